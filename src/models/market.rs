use serde::{Deserialize, Serialize};

/// 한 종목의 하루치 종가 데이터 (KRX 일별 시세 한 행)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDay {
    pub ticker: String,       // "005930"
    pub name: String,         // "삼성전자"
    pub close: i64,           // 종가 (원)
    pub change_pct: f64,      // 등락률 %
    pub volume: u64,          // 거래량 (주)
    pub turnover: f64,        // 거래대금 (원)
}

/// 상승/하락 방향. 무버 리스트와 뉴스 검색 키워드 선택에 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// 방향별 뉴스 검색 키워드 (OR 결합)
    pub fn news_keywords(&self) -> &'static [&'static str] {
        match self {
            Direction::Up => &["급등", "상승", "실적", "수주", "계약"],
            Direction::Down => &["급락", "하락", "악재", "리스크"],
        }
    }
}

/// 방향 태그가 붙은 무버 목록 (순위 1..30, 등락률 기준 정렬 유지)
#[derive(Debug, Clone)]
pub struct MoverList {
    pub direction: Direction,
    pub stocks: Vec<StockDay>,
}

/// 하루치 시장 스크리닝 결과
#[derive(Debug, Clone)]
pub struct MarketBreakdown {
    pub gainers: MoverList,
    pub losers: MoverList,
    /// 필터 통과 종목의 거래대금 중앙값 (당일 재계산, 캐시 없음)
    pub median_turnover: f64,
    pub advance_count: usize,
    pub decline_count: usize,
    pub flat_count: usize,
    /// 상승 상위 5종목 거래대금이 필터 통과 전체에서 차지하는 비율 %
    pub top_focus_pct: f64,
}
