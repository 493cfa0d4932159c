use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 사이트 생성 설정. 기본값은 운영 사이트 기준이며
/// PULSE_OUTPUT_DIR / PULSE_SITE_URL 환경변수로 덮어쓸 수 있다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_url: String,
    pub adsense_client: String,
    pub output_dir: PathBuf,
    /// 생성 대상: 최근 N 거래일
    pub window_days: usize,
    /// 거래일 탐색 범위 (달력일)
    pub calendar_span_days: i64,
    /// 뉴스 수집을 시도하는 최신일 기준 경과일 한도
    pub news_lookback_days: i64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "K-Stock Daily Pulse".to_string(),
            site_url: "https://pre-visual.web.app".to_string(),
            adsense_client: "ca-pub-6025469498161210".to_string(),
            output_dir: PathBuf::from("public"),
            window_days: 10,
            calendar_span_days: 20,
            news_lookback_days: 3,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(dir) = std::env::var("PULSE_OUTPUT_DIR") {
            if !dir.is_empty() {
                cfg.output_dir = PathBuf::from(dir);
            }
        }
        if let Ok(url) = std::env::var("PULSE_SITE_URL") {
            if !url.is_empty() {
                cfg.site_url = url.trim_end_matches('/').to_string();
            }
        }
        cfg
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join("report_archive.json")
    }
}
