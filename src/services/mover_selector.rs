use crate::models::market::{Direction, MarketBreakdown, MoverList, StockDay};

/// 거래 정지/초저유동성 제외 기준
const MIN_VOLUME: u64 = 1000;
/// 권리락·병합 등 특수 케이스로 인한 비정상 등락률 제외 한도
const MAX_ABS_CHANGE_PCT: f64 = 30.0;
/// 방향별 무버 수
const TOP_MOVERS: usize = 30;
/// 거래대금 집중도 계산에 쓰는 상승 상위 종목 수
const FOCUS_TOP: usize = 5;

/// 하루치 전종목 단면을 스크리닝해 상승/하락 상위 30과 시장 요약 통계를 만든다.
/// 정렬은 안정 정렬이라 동률은 공급자 순서를 유지한다.
pub fn select_movers(rows: &[StockDay]) -> MarketBreakdown {
    let filtered: Vec<&StockDay> = rows
        .iter()
        .filter(|s| {
            s.volume >= MIN_VOLUME
                && s.change_pct <= MAX_ABS_CHANGE_PCT
                && s.change_pct >= -MAX_ABS_CHANGE_PCT
        })
        .collect();

    let mut by_change = filtered.clone();
    by_change.sort_by(|a, b| {
        b.change_pct
            .partial_cmp(&a.change_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let gainers: Vec<StockDay> = by_change
        .iter()
        .take(TOP_MOVERS)
        .map(|s| (*s).clone())
        .collect();

    let mut by_change_asc = filtered.clone();
    by_change_asc.sort_by(|a, b| {
        a.change_pct
            .partial_cmp(&b.change_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let losers: Vec<StockDay> = by_change_asc
        .iter()
        .take(TOP_MOVERS)
        .map(|s| (*s).clone())
        .collect();

    let median_turnover = median(&filtered.iter().map(|s| s.turnover).collect::<Vec<f64>>());

    let advance_count = filtered.iter().filter(|s| s.change_pct > 0.0).count();
    let decline_count = filtered.iter().filter(|s| s.change_pct < 0.0).count();
    let flat_count = filtered.iter().filter(|s| s.change_pct == 0.0).count();

    let total_turnover: f64 = filtered.iter().map(|s| s.turnover).sum();
    let focus_turnover: f64 = gainers.iter().take(FOCUS_TOP).map(|s| s.turnover).sum();
    let top_focus_pct = if total_turnover > 0.0 {
        focus_turnover / total_turnover * 100.0
    } else {
        0.0
    };

    MarketBreakdown {
        gainers: MoverList {
            direction: Direction::Up,
            stocks: gainers,
        },
        losers: MoverList {
            direction: Direction::Down,
            stocks: losers,
        },
        median_turnover,
        advance_count,
        decline_count,
        flat_count,
        top_focus_pct,
    }
}

/// 중앙값. 짝수 개수는 가운데 두 값의 평균.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(ticker: &str, change_pct: f64, volume: u64, turnover: f64) -> StockDay {
        StockDay {
            ticker: ticker.to_string(),
            name: format!("종목{}", ticker),
            close: 10_000,
            change_pct,
            volume,
            turnover,
        }
    }

    #[test]
    fn test_filter_drops_illiquid_and_anomalous() {
        let rows = vec![
            stock("A", 5.0, 999, 1000.0),    // 거래량 미달
            stock("B", 30.5, 5000, 1000.0),  // 등락률 초과
            stock("C", -31.0, 5000, 1000.0), // 등락률 미달
            stock("D", 2.0, 1000, 1000.0),   // 경계값 통과
            stock("E", 30.0, 1000, 1000.0),  // 경계값 통과
            stock("F", -30.0, 1000, 1000.0), // 경계값 통과
        ];
        let out = select_movers(&rows);
        let tickers: Vec<&str> = out.gainers.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["E", "D", "F"]);
        assert_eq!(out.advance_count, 2);
        assert_eq!(out.decline_count, 1);
        assert_eq!(out.flat_count, 0);
    }

    #[test]
    fn test_gainers_sorted_desc_losers_asc_max_30() {
        let mut rows = Vec::new();
        for i in 0..40 {
            rows.push(stock(&format!("G{}", i), i as f64 * 0.5, 2000, 100.0));
        }
        let out = select_movers(&rows);
        assert_eq!(out.gainers.stocks.len(), 30);
        assert_eq!(out.losers.stocks.len(), 30);
        for w in out.gainers.stocks.windows(2) {
            assert!(w[0].change_pct >= w[1].change_pct, "상승 목록은 내림차순이어야 함");
        }
        for w in out.losers.stocks.windows(2) {
            assert!(w[0].change_pct <= w[1].change_pct, "하락 목록은 오름차순이어야 함");
        }
    }

    #[test]
    fn test_ties_keep_provider_order() {
        let rows = vec![
            stock("X", 5.0, 2000, 100.0),
            stock("Y", 5.0, 2000, 100.0),
            stock("Z", 5.0, 2000, 100.0),
        ];
        let out = select_movers(&rows);
        let tickers: Vec<&str> = out.gainers.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_median_turnover_over_filtered_set() {
        let rows = vec![
            stock("A", 1.0, 2000, 100.0),
            stock("B", 2.0, 2000, 200.0),
            stock("C", 3.0, 2000, 300.0),
            stock("D", 50.0, 2000, 9_999.0), // 필터 제외, 중앙값에서 빠져야 함
        ];
        let out = select_movers(&rows);
        assert!((out.median_turnover - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_focus_pct_zero_when_no_turnover() {
        let rows = vec![stock("A", 1.0, 2000, 0.0), stock("B", -1.0, 2000, 0.0)];
        let out = select_movers(&rows);
        assert_eq!(out.top_focus_pct, 0.0);
    }

    #[test]
    fn test_top_focus_pct_ratio() {
        // 상승 상위 5 거래대금 500, 전체 1000 → 50%
        let rows = vec![
            stock("A", 5.0, 2000, 200.0),
            stock("B", 4.0, 2000, 150.0),
            stock("C", 3.0, 2000, 100.0),
            stock("D", 2.0, 2000, 30.0),
            stock("E", 1.0, 2000, 20.0),
            stock("F", -1.0, 2000, 250.0),
            stock("G", -2.0, 2000, 250.0),
        ];
        let out = select_movers(&rows);
        assert!((out.top_focus_pct - 50.0).abs() < 1e-9);
        assert!(out.top_focus_pct >= 0.0 && out.top_focus_pct <= 100.0);
    }

    #[test]
    fn test_fewer_than_30_movers_is_valid() {
        let rows = vec![stock("A", 2.0, 2000, 100.0)];
        let out = select_movers(&rows);
        assert_eq!(out.gainers.stocks.len(), 1);
        assert_eq!(out.losers.stocks.len(), 1);
    }
}
