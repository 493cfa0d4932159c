use anyhow::Result;
use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::models::market::{MoverList, StockDay};
use crate::models::report::{DayReport, ReportRecord};
use crate::render::{self, AnalysisCard, MoverRow};
use crate::services::commentary::{comment, detail_reason};
use crate::services::market_data::MarketDataService;
use crate::services::mover_selector::select_movers;
use crate::services::news_ranker::NewsRanker;

/// 방향별 상세 분석 카드 수
const DETAIL_CARDS: usize = 10;
/// 방향별 뉴스 수집 대상 순위 한도 (외부 호출량 제한)
const NEWS_TOP_RANK: usize = 5;

/// 무버 목록 → 코멘트 라벨이 붙은 테이블 행
pub fn mover_rows(stocks: &[StockDay], median_turnover: f64) -> Vec<MoverRow> {
    stocks
        .iter()
        .map(|s| MoverRow {
            stock: s.clone(),
            comment: comment(s.change_pct, s.turnover, median_turnover).label(),
        })
        .collect()
}

/// 목록 1위 종목의 대표 표기: "종목명 (12.34%)". 무버가 없으면 "-".
pub fn representative(stocks: &[StockDay]) -> String {
    stocks
        .first()
        .map(|s| format!("{} ({:.2}%)", s.name, s.change_pct))
        .unwrap_or_else(|| "-".to_string())
}

/// 상위 10 무버의 분석 카드. 순위 5 이내만 뉴스 수집을 시도한다.
async fn build_cards(
    ranker: &mut NewsRanker,
    movers: &MoverList,
    median_turnover: f64,
    day: NaiveDate,
    newest_day: NaiveDate,
) -> Vec<AnalysisCard> {
    let mut cards = Vec::new();
    for (i, stock) in movers.stocks.iter().take(DETAIL_CARDS).enumerate() {
        let news = if i < NEWS_TOP_RANK {
            ranker
                .find_related_news(&stock.name, day, newest_day, movers.direction)
                .await
        } else {
            Vec::new()
        };
        cards.push(AnalysisCard {
            stock: stock.clone(),
            reason: detail_reason(stock.change_pct, stock.turnover, median_turnover),
            news,
        });
    }
    cards
}

/// 하루치 리포트 생성: 시세 수집(실패 시 실행 중단) → 스크리닝 → 코멘트/뉴스 →
/// HTML 렌더링 + 아카이브 레코드.
#[allow(clippy::too_many_arguments)]
pub async fn build_day_report(
    market: &MarketDataService,
    ranker: &mut NewsRanker,
    cfg: &SiteConfig,
    day: NaiveDate,
    newest_day: NaiveDate,
    rank: usize,
    total_days: usize,
    prev_day: Option<NaiveDate>,
    next_day: Option<NaiveDate>,
) -> Result<DayReport> {
    let rows = market.fetch_market_day(day).await?;
    log::info!("{} 시세 {}종목 수집", day, rows.len());

    let breakdown = select_movers(&rows);

    let gainer_rows = mover_rows(&breakdown.gainers.stocks, breakdown.median_turnover);
    let loser_rows = mover_rows(&breakdown.losers.stocks, breakdown.median_turnover);

    let gainer_cards = build_cards(
        ranker,
        &breakdown.gainers,
        breakdown.median_turnover,
        day,
        newest_day,
    )
    .await;
    let loser_cards = build_cards(
        ranker,
        &breakdown.losers,
        breakdown.median_turnover,
        day,
        newest_day,
    )
    .await;

    let html = render::day_page(
        cfg,
        day,
        rank,
        total_days,
        prev_day,
        next_day,
        &breakdown,
        &gainer_rows,
        &loser_rows,
        &gainer_cards,
        &loser_cards,
    );

    let label = day.format("%Y-%m-%d").to_string();
    let record = ReportRecord {
        date: label.clone(),
        path: format!("reports/{}.html", label),
        strong: representative(&breakdown.gainers.stocks),
        weak: representative(&breakdown.losers.stocks),
        advance_count: breakdown.advance_count,
        decline_count: breakdown.decline_count,
        flat_count: breakdown.flat_count,
        top_focus_pct: breakdown.top_focus_pct,
    };

    Ok(DayReport { record, html })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(name: &str, change_pct: f64, volume: u64, turnover: f64) -> StockDay {
        StockDay {
            ticker: "000000".to_string(),
            name: name.to_string(),
            close: 10_000,
            change_pct,
            volume,
            turnover,
        }
    }

    #[test]
    fn test_mover_rows_attach_comment_labels() {
        let stocks = vec![stock("에이컴", 22.0, 5000, 10_000.0)];
        let rows = mover_rows(&stocks, 1_000.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment, "급등 강세 · 거래대금 집중");
    }

    #[test]
    fn test_representative_format_and_empty() {
        let stocks = vec![stock("에이컴", 12.345, 5000, 100.0)];
        assert_eq!(representative(&stocks), "에이컴 (12.35%)");
        assert_eq!(representative(&[]), "-");
    }
}
