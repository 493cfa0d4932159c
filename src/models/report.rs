use serde::{Deserialize, Serialize};

/// 하루치 리포트 요약 레코드. 날짜를 키로 아카이브에 누적되며 삭제되지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    /// "YYYY-MM-DD"
    pub date: String,
    /// 사이트 루트 기준 경로: "reports/YYYY-MM-DD.html"
    pub path: String,
    /// 상승 대표: "종목명 (12.34%)"
    pub strong: String,
    /// 하락 대표
    pub weak: String,
    #[serde(default)]
    pub advance_count: usize,
    #[serde(default)]
    pub decline_count: usize,
    #[serde(default)]
    pub flat_count: usize,
    #[serde(default)]
    pub top_focus_pct: f64,
}

impl ReportRecord {
    /// 디스크에는 파일이 있으나 아카이브 항목이 없는 날짜용 자리표시 레코드.
    /// 미상 필드는 "-" 로 렌더링된다.
    pub fn placeholder(date: &str) -> Self {
        Self {
            date: date.to_string(),
            path: format!("reports/{}.html", date),
            strong: "-".to_string(),
            weak: "-".to_string(),
            advance_count: 0,
            decline_count: 0,
            flat_count: 0,
            top_focus_pct: 0.0,
        }
    }
}

/// 하루치 생성 결과: 렌더링된 HTML + 아카이브용 요약 레코드
#[derive(Debug, Clone)]
pub struct DayReport {
    pub record: ReportRecord,
    pub html: String,
}
