use std::fmt;

/// 등락률 기반 모멘텀 구간. 위에서부터 순서대로 평가하며 첫 매치가 적용된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Momentum {
    SharpSurge,   // ≥ +20
    StrongRise,   // ≥ +10
    ModerateRise, // ≥ +5
    SharpPlunge,  // ≤ -20
    StrongFall,   // ≤ -10
    ModerateFall, // ≤ -5
    Flat,         // 그 외
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Momentum::SharpSurge => "급등 강세",
            Momentum::StrongRise => "강한 상승",
            Momentum::ModerateRise => "상승 우위",
            Momentum::SharpPlunge => "급락 약세",
            Momentum::StrongFall => "강한 하락",
            Momentum::ModerateFall => "하락 우위",
            Momentum::Flat => "보합권 이탈",
        };
        f.write_str(label)
    }
}

/// 거래대금 중앙값 대비 유입 강도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Concentration, // ≥ 중앙값 5배
    Inflow,        // ≥ 중앙값 2배
    Ordinary,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Flow::Concentration => "거래대금 집중",
            Flow::Inflow => "거래 유입",
            Flow::Ordinary => "거래 평이",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commentary {
    pub momentum: Momentum,
    pub flow: Flow,
}

impl Commentary {
    /// 테이블 해석 칼럼용 한 줄 라벨
    pub fn label(&self) -> String {
        format!("{} · {}", self.momentum, self.flow)
    }
}

/// (등락률, 거래대금, 시장 중앙값) → 코멘트. 순수 함수, 상태 없음.
pub fn comment(pct: f64, turnover: f64, median_turnover: f64) -> Commentary {
    let momentum = if pct >= 20.0 {
        Momentum::SharpSurge
    } else if pct >= 10.0 {
        Momentum::StrongRise
    } else if pct >= 5.0 {
        Momentum::ModerateRise
    } else if pct <= -20.0 {
        Momentum::SharpPlunge
    } else if pct <= -10.0 {
        Momentum::StrongFall
    } else if pct <= -5.0 {
        Momentum::ModerateFall
    } else {
        Momentum::Flat
    };

    let flow = if median_turnover > 0.0 && turnover >= median_turnover * 5.0 {
        Flow::Concentration
    } else if median_turnover > 0.0 && turnover >= median_turnover * 2.0 {
        Flow::Inflow
    } else {
        Flow::Ordinary
    };

    Commentary { momentum, flow }
}

/// 상세 분석 카드용 서술형 코멘트. 임계값은 comment 와 동일, 문구만 풍부하다.
/// 상위 10 무버의 카드에만 쓰인다.
pub fn detail_reason(pct: f64, turnover: f64, median_turnover: f64) -> String {
    let trend = if pct >= 20.0 {
        "하루 만에 20% 이상 치솟으며 수급이 쏠린 전형적인 급등 흐름입니다"
    } else if pct >= 10.0 {
        "두 자릿수 상승으로 매수세가 뚜렷하게 우위에 선 하루였습니다"
    } else if pct >= 5.0 {
        "5% 이상 오르며 상승 쪽으로 무게가 실렸습니다"
    } else if pct <= -20.0 {
        "하루 만에 20% 넘게 밀리며 투매성 물량이 쏟아진 급락 흐름입니다"
    } else if pct <= -10.0 {
        "두 자릿수 하락으로 매도세가 뚜렷하게 우위에 선 하루였습니다"
    } else if pct <= -5.0 {
        "5% 이상 내리며 하락 쪽으로 무게가 실렸습니다"
    } else {
        "등락률 자체는 보합권에 가까워 방향성이 제한적이었습니다"
    };

    let flow = if median_turnover > 0.0 && turnover >= median_turnover * 5.0 {
        "거래대금이 시장 중앙값의 5배를 넘어 자금이 집중적으로 몰렸습니다."
    } else if median_turnover > 0.0 && turnover >= median_turnover * 2.0 {
        "거래대금이 시장 중앙값의 2배를 웃돌아 평소보다 자금 유입이 활발했습니다."
    } else {
        "거래대금은 시장 평균 수준으로 특이한 자금 쏠림은 없었습니다."
    };

    format!("{}. {}", trend, flow)
}
