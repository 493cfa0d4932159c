use std::collections::{HashMap, HashSet};

use anyhow::Result;
use chrono::{Duration, NaiveDate};

use crate::models::market::Direction;
use crate::models::news::{NewsCandidate, RelatedNews};
use crate::utils::http::build_news_client;

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";

/// 종목·일자·방향당 최종 채택 건수
const MAX_RESULTS: usize = 3;
/// 이 점수 미만 후보는 버린다
const MIN_SCORE: i32 = 2;
/// 헤드라인에 종목명이 그대로 포함
const SCORE_NAME_MATCH: i32 = 4;
/// 헤드라인에 방향 키워드 포함
const SCORE_DIRECTION_KEYWORD: i32 = 2;
/// 신뢰 매체 목록에 포함
const SCORE_TRUSTED_SOURCE: i32 = 3;

/// 신뢰 매체 허용 목록. 여기 없는 매체는 점수와 무관하게 제외된다.
const TRUSTED_SOURCES: &[&str] = &[
    "연합뉴스",
    "뉴시스",
    "한국경제",
    "매일경제",
    "서울경제",
    "머니투데이",
    "조선비즈",
    "이데일리",
    "아시아경제",
    "파이낸셜뉴스",
    "헤럴드경제",
    "전자신문",
];

/// 피드가 쓰는 매체 표기 → 허용 목록의 정식 표기. 키는 소문자 비교.
const SOURCE_ALIASES: &[(&str, &str)] = &[
    ("chosunbiz", "조선비즈"),
    ("yonhap news agency", "연합뉴스"),
    ("yonhapnews", "연합뉴스"),
    ("yna.co.kr", "연합뉴스"),
    ("newsis", "뉴시스"),
    ("the korea economic daily", "한국경제"),
    ("hankyung", "한국경제"),
    ("한경닷컴", "한국경제"),
    ("maeil business newspaper", "매일경제"),
    ("mk.co.kr", "매일경제"),
    ("sedaily", "서울경제"),
    ("moneytoday", "머니투데이"),
    ("mt.co.kr", "머니투데이"),
    ("edaily", "이데일리"),
    ("asiae", "아시아경제"),
    ("fnnews", "파이낸셜뉴스"),
    ("herald economy", "헤럴드경제"),
    ("etnews", "전자신문"),
];

/// 매체명 정규화: 공백 정리 후 별칭 테이블을 대소문자 무시로 조회
pub fn normalize_source(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    for (alias, canonical) in SOURCE_ALIASES {
        if lower == *alias {
            return (*canonical).to_string();
        }
    }
    trimmed.to_string()
}

pub fn is_trusted_source(source: &str) -> bool {
    TRUSTED_SOURCES.contains(&source)
}

/// 구글 뉴스 표시 제목은 "헤드라인 - 매체" 형식. 마지막 " - " 뒤를 매체로 분리.
pub fn split_display_title(display: &str) -> (String, Option<String>) {
    match display.rsplit_once(" - ") {
        Some((headline, publisher)) if !headline.trim().is_empty() => {
            (headline.trim().to_string(), Some(publisher.trim().to_string()))
        }
        _ => (display.trim().to_string(), None),
    }
}

/// 후보 점수: 종목명 +4, 방향 키워드 +2, 신뢰 매체 +3. 최신성은 반영하지 않는다.
pub fn score_candidate(headline: &str, source: &str, name: &str, direction: Direction) -> i32 {
    let mut score = 0;
    if headline.contains(name) {
        score += SCORE_NAME_MATCH;
    }
    if direction.news_keywords().iter().any(|k| headline.contains(k)) {
        score += SCORE_DIRECTION_KEYWORD;
    }
    if is_trusted_source(source) {
        score += SCORE_TRUSTED_SOURCE;
    }
    score
}

/// 점수순 안정 정렬 → 헤드라인 중복 제거(선착순) → 비신뢰/저점수 탈락 → 상위 3건.
/// 순수 함수라 임계값별로 단독 테스트할 수 있다.
pub fn rank_candidates(candidates: Vec<NewsCandidate>) -> Vec<RelatedNews> {
    let mut sorted = candidates;
    // 안정 정렬이므로 동점은 피드 순서를 유지한다
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for cand in sorted {
        let dedup_key = cand.title.trim().to_lowercase();
        if !seen.insert(dedup_key) {
            continue;
        }
        if !is_trusted_source(&cand.source) || cand.score < MIN_SCORE {
            continue;
        }
        out.push(RelatedNews::from(cand));
        if out.len() >= MAX_RESULTS {
            break;
        }
    }
    out
}

/// 종목명 정확 일치 + 방향 키워드 OR + [day-2, day+1] 날짜 창
fn build_query(name: &str, day: NaiveDate, direction: Direction) -> String {
    let keywords = direction.news_keywords().join(" OR ");
    let after = (day - Duration::days(2)).format("%Y-%m-%d");
    let before = (day + Duration::days(1)).format("%Y-%m-%d");
    format!("\"{}\" ({}) after:{} before:{}", name, keywords, after, before)
}

type CacheKey = (String, NaiveDate, Direction);

/// 구글 뉴스 RSS 검색으로 무버 관련 헤드라인을 수집·랭킹하는 서비스.
/// 결과는 한 번의 생성 실행 동안만 (종목명, 일자, 방향) 키로 캐시된다.
pub struct NewsRanker {
    client: reqwest::Client,
    cache: HashMap<CacheKey, Vec<RelatedNews>>,
    lookback_days: i64,
}

impl NewsRanker {
    pub fn new(lookback_days: i64) -> Result<Self> {
        Ok(Self {
            client: build_news_client()?,
            cache: HashMap::new(),
            lookback_days,
        })
    }

    /// 관련 뉴스 0..3건. 실패는 빈 결과로 흡수되며 리포트 생성을 막지 않는다.
    /// newest_day 는 이번 실행 창의 최신 거래일: 그보다 lookback 이상 과거인
    /// 날짜는 피드 조회 없이 "뉴스 없음" 처리한다.
    pub async fn find_related_news(
        &mut self,
        name: &str,
        day: NaiveDate,
        newest_day: NaiveDate,
        direction: Direction,
    ) -> Vec<RelatedNews> {
        if (newest_day - day).num_days() > self.lookback_days {
            return Vec::new();
        }

        let key = (name.to_string(), day, direction);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let result = match self.fetch_and_rank(name, day, direction).await {
            Ok(news) => news,
            Err(e) => {
                log::warn!("{} {} 관련 뉴스 조회 실패 (무시): {}", day, name, e);
                Vec::new()
            }
        };
        self.cache.insert(key, result.clone());
        result
    }

    async fn fetch_and_rank(
        &self,
        name: &str,
        day: NaiveDate,
        direction: Direction,
    ) -> Result<Vec<RelatedNews>> {
        let query = build_query(name, day, direction);
        let url = format!(
            "{}?q={}&hl=ko&gl=KR&ceid=KR:ko",
            GOOGLE_NEWS_RSS,
            urlencoding::encode(&query)
        );

        let resp = self.client.get(&url).send().await?;
        let bytes = resp.bytes().await?;
        let channel = rss::Channel::read_from(&bytes[..])?;

        let mut candidates = Vec::new();
        for item in channel.items() {
            let display = match item.title() {
                Some(t) if !t.trim().is_empty() => t,
                _ => continue,
            };
            let (headline, suffix_publisher) = split_display_title(display);
            // " - " 분리 실패 시 피드의 <source> 요소로 대체
            let raw_source = suffix_publisher
                .or_else(|| item.source().and_then(|s| s.title().map(|t| t.to_string())))
                .unwrap_or_default();
            let source = normalize_source(&raw_source);
            let score = score_candidate(&headline, &source, name, direction);

            candidates.push(NewsCandidate {
                title: headline,
                link: item.link().unwrap_or("").to_string(),
                pub_date: item.pub_date().unwrap_or("").to_string(),
                source,
                score,
            });
        }

        Ok(rank_candidates(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(title: &str, source: &str, score: i32) -> NewsCandidate {
        NewsCandidate {
            title: title.to_string(),
            link: format!("https://news.example/{}", score),
            pub_date: "Fri, 21 Aug 2026 07:00:00 GMT".to_string(),
            source: source.to_string(),
            score,
        }
    }

    #[test]
    fn test_split_display_title() {
        let (headline, publisher) = split_display_title("에이컴 반도체 수주 급등 - 조선비즈");
        assert_eq!(headline, "에이컴 반도체 수주 급등");
        assert_eq!(publisher.as_deref(), Some("조선비즈"));

        let (headline, publisher) = split_display_title("매체 표기 없는 제목");
        assert_eq!(headline, "매체 표기 없는 제목");
        assert!(publisher.is_none());
    }

    #[test]
    fn test_normalize_source_alias_case_insensitive() {
        assert_eq!(normalize_source("ChosunBiz"), "조선비즈");
        assert_eq!(normalize_source(" mk.co.kr "), "매일경제");
        assert_eq!(normalize_source("연합뉴스"), "연합뉴스");
        // 테이블에 없으면 공백만 정리
        assert_eq!(normalize_source(" 블로그뉴스 "), "블로그뉴스");
    }

    #[test]
    fn test_score_components() {
        // 종목명 +4, 상승 키워드 +2, 신뢰 매체 +3
        assert_eq!(
            score_candidate("에이컴 급등 마감", "연합뉴스", "에이컴", Direction::Up),
            4 + 2 + 3
        );
        // 종목명 없음, 키워드만
        assert_eq!(
            score_candidate("반도체주 일제히 상승", "개인블로그", "에이컴", Direction::Up),
            2
        );
        // 하락 키워드는 상승 방향 검색에서 점수 없음
        assert_eq!(
            score_candidate("에이컴 급락", "개인블로그", "에이컴", Direction::Up),
            4
        );
        assert_eq!(
            score_candidate("에이컴 급락", "개인블로그", "에이컴", Direction::Down),
            4 + 2
        );
    }

    #[test]
    fn test_rank_sorts_desc_and_keeps_feed_order_on_ties() {
        let out = rank_candidates(vec![
            cand("첫 번째 동점 기사 상승", "연합뉴스", 5),
            cand("최고점 기사 상승", "매일경제", 9),
            cand("두 번째 동점 기사 상승", "뉴시스", 5),
        ]);
        let titles: Vec<&str> = out.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["최고점 기사 상승", "첫 번째 동점 기사 상승", "두 번째 동점 기사 상승"]
        );
    }

    #[test]
    fn test_rank_dedup_case_and_whitespace_first_wins() {
        let out = rank_candidates(vec![
            cand("Acme 수주 확대  ", "연합뉴스", 9),
            cand("acme 수주 확대", "매일경제", 5),
        ]);
        assert_eq!(out.len(), 1, "정규화 후 동일 헤드라인은 하나만 남아야 함");
        assert_eq!(out[0].source, "연합뉴스", "먼저 본 후보가 이겨야 함");
    }

    #[test]
    fn test_rank_drops_untrusted_regardless_of_score() {
        let out = rank_candidates(vec![cand("대형 호재 급등", "개인블로그", 100)]);
        assert!(out.is_empty(), "비신뢰 매체는 점수와 무관하게 제외");
    }

    #[test]
    fn test_rank_drops_below_min_score() {
        let out = rank_candidates(vec![cand("무관한 기사", "연합뉴스", 1)]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rank_caps_at_three() {
        let out = rank_candidates(vec![
            cand("기사 하나", "연합뉴스", 9),
            cand("기사 둘", "연합뉴스", 8),
            cand("기사 셋", "연합뉴스", 7),
            cand("기사 넷", "연합뉴스", 6),
        ]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_build_query_window_and_keywords() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
        let q = build_query("에이컴", day, Direction::Up);
        assert!(q.starts_with("\"에이컴\""), "종목명은 정확 일치 인용: {}", q);
        assert!(q.contains("급등 OR 상승"), "방향 키워드 OR 결합: {}", q);
        assert!(q.contains("after:2026-08-19"), "{}", q);
        assert!(q.contains("before:2026-08-22"), "{}", q);
    }

    #[tokio::test]
    async fn test_lookback_gate_skips_old_days() {
        let mut ranker = NewsRanker::new(3).expect("client 생성 실패");
        let newest = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
        let old = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        // 조회 없이 즉시 빈 결과 (네트워크 불필요)
        let out = ranker.find_related_news("에이컴", old, newest, Direction::Up).await;
        assert!(out.is_empty());
        assert!(ranker.cache.is_empty(), "경과일 초과 건은 캐시에 남기지 않음");
    }
}
