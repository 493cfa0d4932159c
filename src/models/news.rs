use serde::{Deserialize, Serialize};

/// 피드에서 막 파싱된 후보 헤드라인. 랭킹 후 폐기되며 저장되지 않는다.
#[derive(Debug, Clone)]
pub struct NewsCandidate {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    /// 별칭 테이블을 거친 정규화된 매체명
    pub source: String,
    pub score: i32,
}

/// 필터/중복제거를 통과해 리포트에 실리는 관련 뉴스 (종목·일자·방향당 0..3건)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedNews {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub source: String,
}

impl From<NewsCandidate> for RelatedNews {
    fn from(c: NewsCandidate) -> Self {
        Self {
            title: c.title,
            link: c.link,
            pub_date: c.pub_date,
            source: c.source,
        }
    }
}
