use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::models::market::StockDay;
use crate::utils::http::build_krx_client;

const KRX_JSON_URL: &str = "http://data.krx.co.kr/comm/bldAttendant/getJsonData.cmd";
/// 전종목 일별 시세 (유가증권/코스닥)
const BLD_DAILY_ALL: &str = "dbms/MDC/STAT/standard/MDCSTAT01501";
/// 코스피 지수 일별 시계열. 행이 존재하는 날짜 = 거래일.
const BLD_INDEX_SERIES: &str = "dbms/MDC/STAT/standard/MDCSTAT00301";

/// 시장 구분 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketId {
    Kospi,
    Kosdaq,
}

impl MarketId {
    fn krx_code(&self) -> &'static str {
        match self {
            MarketId::Kospi => "STK",
            MarketId::Kosdaq => "KSQ",
        }
    }
}

/// KRX 정보데이터시스템에서 일별 시세/거래일을 가져오는 수집기.
/// 시세 수집 실패는 해당 실행에 치명적이다 (부분 리포트를 만들지 않음).
pub struct MarketDataService {
    client: reqwest::Client,
}

impl MarketDataService {
    pub fn new() -> Result<Self> {
        let client = build_krx_client()?;
        Ok(Self { client })
    }

    /// 특정 거래일의 한 시장 전종목 시세
    pub async fn fetch_market_ohlcv(&self, day: NaiveDate, market: MarketId) -> Result<Vec<StockDay>> {
        let trd_dd = day.format("%Y%m%d").to_string();
        let params = [
            ("bld", BLD_DAILY_ALL),
            ("locale", "ko_KR"),
            ("mktId", market.krx_code()),
            ("trdDd", trd_dd.as_str()),
            ("share", "1"),
            ("money", "1"),
            ("csvxls_isNo", "false"),
        ];

        let resp = self.client.post(KRX_JSON_URL).form(&params).send().await?;
        let json: serde_json::Value = resp.json().await?;

        let rows = json
            .get("OutBlock_1")
            .and_then(|v| v.as_array())
            .ok_or_else(|| anyhow!("KRX 일별 시세 응답 형식 오류 ({} {})", trd_dd, market.krx_code()))?;

        let mut stocks = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(stock) = parse_krx_row(row) {
                stocks.push(stock);
            }
        }
        Ok(stocks)
    }

    /// 코스피+코스닥 합산 하루치 단면. 공급자 순서(코스피 먼저)를 보존한다.
    pub async fn fetch_market_day(&self, day: NaiveDate) -> Result<Vec<StockDay>> {
        let mut rows = self.fetch_market_ohlcv(day, MarketId::Kospi).await?;
        let kosdaq = self.fetch_market_ohlcv(day, MarketId::Kosdaq).await?;
        rows.extend(kosdaq);
        if rows.is_empty() {
            return Err(anyhow!("{} 시세 데이터 없음", day));
        }
        Ok(rows)
    }

    /// [from, to] 구간의 거래일을 오름차순으로 반환.
    /// 코스피 지수 시계열에 행이 있는 날짜만 거래일로 본다.
    pub async fn business_days(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
        let strt_dd = from.format("%Y%m%d").to_string();
        let end_dd = to.format("%Y%m%d").to_string();
        let params = [
            ("bld", BLD_INDEX_SERIES),
            ("locale", "ko_KR"),
            ("indIdx", "1"),
            ("indIdx2", "001"),
            ("strtDd", strt_dd.as_str()),
            ("endDd", end_dd.as_str()),
            ("csvxls_isNo", "false"),
        ];

        let resp = self.client.post(KRX_JSON_URL).form(&params).send().await?;
        let json: serde_json::Value = resp.json().await?;

        let rows = json
            .get("output")
            .or_else(|| json.get("OutBlock_1"))
            .and_then(|v| v.as_array())
            .ok_or_else(|| anyhow!("KRX 지수 시계열 응답 형식 오류"))?;

        let mut days = Vec::with_capacity(rows.len());
        for row in rows {
            let trd_dd = row.get("TRD_DD").and_then(|v| v.as_str()).unwrap_or("");
            // "2026/08/21" 형식
            if let Ok(d) = NaiveDate::parse_from_str(trd_dd, "%Y/%m/%d") {
                days.push(d);
            }
        }
        days.sort();
        days.dedup();
        Ok(days)
    }
}

/// KRX 행 하나를 StockDay 로 변환. 숫자는 "12,500" 같은 콤마 문자열로 온다.
fn parse_krx_row(row: &serde_json::Value) -> Option<StockDay> {
    let ticker = row.get("ISU_SRT_CD")?.as_str()?.trim().to_string();
    let name = row.get("ISU_ABBRV")?.as_str()?.trim().to_string();
    if ticker.is_empty() || name.is_empty() {
        return None;
    }

    let close = get_num(row, "TDD_CLSPRC") as i64;
    // 정지 종목 등 가격 없는 행 제외
    if close <= 0 {
        return None;
    }

    Some(StockDay {
        ticker,
        name,
        close,
        change_pct: get_num(row, "FLUC_RT"),
        volume: get_num(row, "ACC_TRDVOL").max(0.0) as u64,
        turnover: get_num(row, "ACC_TRDVAL"),
    })
}

fn get_num(row: &serde_json::Value, key: &str) -> f64 {
    row.get(key)
        .and_then(|v| {
            if v.is_f64() || v.is_i64() {
                v.as_f64()
            } else if v.is_string() {
                let cleaned = v.as_str()?.trim().replace(',', "");
                if cleaned.is_empty() || cleaned == "-" {
                    return None;
                }
                cleaned.parse::<f64>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_krx_row_comma_numbers() {
        let row = serde_json::json!({
            "ISU_SRT_CD": "005930",
            "ISU_ABBRV": "삼성전자",
            "TDD_CLSPRC": "71,200",
            "FLUC_RT": "-1.25",
            "ACC_TRDVOL": "12,345,678",
            "ACC_TRDVAL": "878,901,234,500",
        });
        let stock = parse_krx_row(&row).expect("정상 행은 파싱되어야 함");
        assert_eq!(stock.ticker, "005930");
        assert_eq!(stock.close, 71200);
        assert_eq!(stock.volume, 12_345_678);
        assert!((stock.change_pct - (-1.25)).abs() < 1e-9);
        assert!((stock.turnover - 878_901_234_500.0).abs() < 1.0);
    }

    #[test]
    fn test_parse_krx_row_skips_haltless_price() {
        let row = serde_json::json!({
            "ISU_SRT_CD": "000001",
            "ISU_ABBRV": "정지종목",
            "TDD_CLSPRC": "-",
            "FLUC_RT": "0.00",
            "ACC_TRDVOL": "0",
            "ACC_TRDVAL": "0",
        });
        assert!(parse_krx_row(&row).is_none(), "가격 없는 행은 건너뛰어야 함");
    }

    #[test]
    fn test_get_num_mixed_types() {
        let row = serde_json::json!({ "a": 3.5, "b": 7, "c": "1,000", "d": "" });
        assert!((get_num(&row, "a") - 3.5).abs() < 1e-9);
        assert!((get_num(&row, "b") - 7.0).abs() < 1e-9);
        assert!((get_num(&row, "c") - 1000.0).abs() < 1e-9);
        assert_eq!(get_num(&row, "d"), 0.0);
        assert_eq!(get_num(&row, "missing"), 0.0);
    }
}
