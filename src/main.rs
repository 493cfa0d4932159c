use anyhow::{anyhow, Result};
use chrono::{Duration, Local};

use pulse_lib::config::SiteConfig;
use pulse_lib::render;
use pulse_lib::services::archive::Archive;
use pulse_lib::services::market_data::MarketDataService;
use pulse_lib::services::news_ranker::NewsRanker;
use pulse_lib::services::report_builder::build_day_report;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = SiteConfig::from_env();
    let market = MarketDataService::new()?;
    let mut ranker = NewsRanker::new(cfg.news_lookback_days)?;

    let reports_dir = cfg.reports_dir();
    std::fs::create_dir_all(&reports_dir)?;

    // 최근 20일 달력 범위 안의 거래일 중 마지막 10일이 생성 대상
    let today = Local::now().date_naive();
    let start = today - Duration::days(cfg.calendar_span_days);
    let biz_days = market.business_days(start, today).await?;
    if biz_days.is_empty() {
        return Err(anyhow!("{} ~ {} 범위에 거래일이 없음", start, today));
    }
    let skip = biz_days.len().saturating_sub(cfg.window_days);
    let target_days: Vec<_> = biz_days[skip..].to_vec();
    let newest_day = *target_days.last().expect("빈 창은 위에서 걸러짐");
    log::info!("생성 대상 {}거래일: {} ~ {}", target_days.len(), target_days[0], newest_day);

    // 하루씩 순차 처리. 시세 수집 실패는 실행 전체를 중단한다.
    let mut new_records = Vec::with_capacity(target_days.len());
    for (i, &day) in target_days.iter().enumerate() {
        let prev_day = if i > 0 { Some(target_days[i - 1]) } else { None };
        let next_day = target_days.get(i + 1).copied();

        let report = build_day_report(
            &market,
            &mut ranker,
            &cfg,
            day,
            newest_day,
            i + 1,
            target_days.len(),
            prev_day,
            next_day,
        )
        .await?;

        let out_path = reports_dir.join(format!("{}.html", report.record.date));
        std::fs::write(&out_path, &report.html)?;
        log::info!("{} 리포트 저장: {}", report.record.date, out_path.display());
        new_records.push(report.record);
    }

    // 아카이브는 추가 전용: 이번 창의 날짜만 갱신하고 과거 날짜는 보존
    let mut archive = Archive::load(&cfg.archive_path());
    archive.merge(new_records.clone());
    archive.reconcile_with_disk(&reports_dir)?;
    archive.save()?;

    let index_html = render::index_page(&cfg, &archive.records_newest_first());
    std::fs::write(cfg.output_dir.join("index.html"), index_html)?;

    let sitemap_xml = render::sitemap(&cfg, &archive.report_paths_newest_first());
    std::fs::write(cfg.output_dir.join("sitemap.xml"), sitemap_xml)?;

    println!("generated {} daily report pages", new_records.len());
    println!(
        "days {}",
        new_records
            .iter()
            .map(|r| r.date.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("archive total {} dates", archive.len());

    Ok(())
}
