//! 정적 페이지 렌더링. 일자별 리포트 / 목록 / 사이트맵을 문자열 템플릿으로 만든다.

use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::models::market::{MarketBreakdown, StockDay};
use crate::models::news::RelatedNews;
use crate::models::report::ReportRecord;
use crate::utils::format::fmt_int;

/// 무버 테이블 한 행 (코멘트 라벨 포함)
pub struct MoverRow {
    pub stock: StockDay,
    pub comment: String,
}

/// 상위 10 무버 상세 분석 카드
pub struct AnalysisCard {
    pub stock: StockDay,
    pub reason: String,
    pub news: Vec<RelatedNews>,
}

/// 공통 페이지 골격
pub fn page(cfg: &SiteConfig, title: &str, description: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="ko">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta name="google-adsense-account" content="{adsense}" />
    <meta name="description" content="{description}" />
    <title>{title}</title>
    <link rel="preconnect" href="https://fonts.googleapis.com" />
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin />
    <link href="https://fonts.googleapis.com/css2?family=Do+Hyeon&family=Noto+Sans+KR:wght@400;600;700&display=swap" rel="stylesheet" />
    <link rel="stylesheet" href="/style.css" />
    <script async src="https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client={adsense}" crossorigin="anonymous"></script>
  </head>
  <body>
    {body}
  </body>
</html>
"#,
        adsense = cfg.adsense_client,
        description = description,
        title = title,
        body = body,
    )
}

fn header(cfg: &SiteConfig) -> String {
    format!(
        r#"<header class="site-header">
  <div class="header-inner">
    <a class="brand" href="/">{}</a>
    <nav class="site-nav" aria-label="리포트 메뉴">
      <a href="/">일자별 리포트</a>
      <a href="/privacy.html">개인정보처리방침</a>
      <a href="/terms.html">이용약관</a>
    </nav>
  </div>
</header>"#,
        cfg.site_name
    )
}

fn mover_table_rows(rows: &[MoverRow]) -> String {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let s = &row.stock;
        out.push(format!(
            "<tr><td>{rank}</td><td>{name}</td><td>{ticker}</td><td>{close}</td><td>{pct:.2}%</td><td>{vol}</td><td>{turnover}</td><td>{comment}</td></tr>",
            rank = i + 1,
            name = s.name,
            ticker = s.ticker,
            close = fmt_int(s.close as f64),
            pct = s.change_pct,
            vol = fmt_int(s.volume as f64),
            turnover = fmt_int(s.turnover),
            comment = row.comment,
        ));
    }
    out.join("\n")
}

fn mover_table(heading: &str, rows: &[MoverRow]) -> String {
    format!(
        r#"<section class="panel">
  <h2>{heading}</h2>
  <div class="table-wrap">
    <table>
      <thead>
        <tr><th>순위</th><th>종목명</th><th>티커</th><th>종가(원)</th><th>등락률</th><th>거래량</th><th>거래대금(원)</th><th>해석</th></tr>
      </thead>
      <tbody>
        {rows}
      </tbody>
    </table>
  </div>
</section>"#,
        heading = heading,
        rows = mover_table_rows(rows),
    )
}

fn news_list(news: &[RelatedNews]) -> String {
    if news.is_empty() {
        return r#"<p class="no-news">관련 뉴스 없음</p>"#.to_string();
    }
    let items: Vec<String> = news
        .iter()
        .map(|n| {
            format!(
                r#"<li><a href="{link}" target="_blank" rel="noopener">{title}</a> <span class="news-meta">{source} · {date}</span></li>"#,
                link = n.link,
                title = n.title,
                source = n.source,
                date = n.pub_date,
            )
        })
        .collect();
    format!("<ul class=\"news-list\">\n{}\n</ul>", items.join("\n"))
}

fn analysis_cards(heading: &str, cards: &[AnalysisCard]) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            format!(
                r#"<article class="stock-card">
  <h3>{rank}. {name} <span class="card-pct">{pct:.2}%</span></h3>
  <p class="reason">{reason}</p>
  {news}
</article>"#,
                rank = i + 1,
                name = card.stock.name,
                pct = card.stock.change_pct,
                reason = card.reason,
                news = news_list(&card.news),
            )
        })
        .collect();
    format!(
        r#"<section class="panel">
  <h2>{heading}</h2>
  <div class="cards">
{cards}
  </div>
</section>"#,
        heading = heading,
        cards = rendered.join("\n"),
    )
}

/// 일자별 리포트 페이지
#[allow(clippy::too_many_arguments)]
pub fn day_page(
    cfg: &SiteConfig,
    day: NaiveDate,
    rank: usize,
    total_days: usize,
    prev_day: Option<NaiveDate>,
    next_day: Option<NaiveDate>,
    breakdown: &MarketBreakdown,
    gainer_rows: &[MoverRow],
    loser_rows: &[MoverRow],
    gainer_cards: &[AnalysisCard],
    loser_cards: &[AnalysisCard],
) -> String {
    let label = day.format("%Y-%m-%d").to_string();
    let prev_link = prev_day
        .map(|d| format!("/reports/{}.html", d.format("%Y-%m-%d")))
        .unwrap_or_else(|| "#".to_string());
    let next_link = next_day
        .map(|d| format!("/reports/{}.html", d.format("%Y-%m-%d")))
        .unwrap_or_else(|| "#".to_string());
    let prev_class = if prev_day.is_some() { "" } else { " disabled" };
    let next_class = if next_day.is_some() { "" } else { " disabled" };

    let body = format!(
        r#"{header}

<main class="app">
  <section class="hero">
    <p class="kicker">KOREA MARKET DAILY REPORT</p>
    <h1>{label} 상승/하락 30 종목 분석</h1>
    <p class="desc">최근 {total} 거래일 리포트 중 {rank}/{total} 페이지. 전 종목 일일 등락률 기준으로 상위/하위 30개를 정리했습니다.</p>
    <p class="meta-line">상승 {adv}개 · 하락 {dec}개 · 보합 {flat}개 · 상위 5개 거래대금 집중도(필터 통과 종목 기준) {focus:.2}%</p>
    <div class="pager">
      <a class="pager-link{prev_class}" href="{prev_link}">이전 거래일</a>
      <a class="pager-link" href="/">목록</a>
      <a class="pager-link{next_class}" href="{next_link}">다음 거래일</a>
    </div>
  </section>

{gainer_table}

{loser_table}

{gainer_cards}

{loser_cards}

  <section class="panel">
    <h2>해석 요약</h2>
    <ul class="policy-list">
      <li>당일 등락률은 장마감 기준이며 실시간 변동과 다를 수 있습니다.</li>
      <li>상승/하락 종목은 시장 전체 흐름과 개별 이슈의 영향을 동시에 받습니다.</li>
      <li>관련 뉴스는 자동 수집된 헤드라인으로, 누락되거나 무관할 수 있습니다.</li>
      <li>본 자료는 투자 권유가 아닌 정보 제공용 요약입니다.</li>
    </ul>
  </section>

  <footer class="site-footer">
    <p>데이터 출처: KRX 일별 시세(수집 시점 기준)</p>
    <p>면책: 본 페이지는 투자 자문이 아닙니다.</p>
  </footer>
</main>"#,
        header = header(cfg),
        label = label,
        rank = rank,
        total = total_days,
        adv = breakdown.advance_count,
        dec = breakdown.decline_count,
        flat = breakdown.flat_count,
        focus = breakdown.top_focus_pct,
        prev_class = prev_class,
        prev_link = prev_link,
        next_class = next_class,
        next_link = next_link,
        gainer_table = mover_table("상승 상위 30", gainer_rows),
        loser_table = mover_table("하락 상위 30", loser_rows),
        gainer_cards = analysis_cards("상승 상위 10 분석", gainer_cards),
        loser_cards = analysis_cards("하락 상위 10 분석", loser_cards),
    );

    page(
        cfg,
        &format!("{} 한국주식 상승·하락 30 분석 | {}", label, cfg.site_name),
        &format!(
            "{} 한국 주식시장 상승 30개와 하락 30개 종목을 거래량/거래대금·관련 뉴스와 함께 분석한 리포트",
            label
        ),
        &body,
    )
}

/// 목록 페이지. 아카이브 전체를 최신일부터 나열한다.
pub fn index_page(cfg: &SiteConfig, records_newest_first: &[&ReportRecord]) -> String {
    let cards: Vec<String> = records_newest_first
        .iter()
        .map(|r| {
            format!(
                r#"<article class="report-card">
  <h3><a href="/{path}">{date} 주식장 분석</a></h3>
  <p>상승 대표: {strong}</p>
  <p>하락 대표: {weak}</p>
  <a class="read-link" href="/{path}">하루치 상세 보기</a>
</article>"#,
                path = r.path,
                date = r.date,
                strong = r.strong,
                weak = r.weak,
            )
        })
        .collect();

    let body = format!(
        r#"{header}

<main class="app">
  <section class="hero">
    <p class="kicker">KOREA STOCK BLOG</p>
    <h1>매일 한국 주식 상승 30 / 하락 30 분석</h1>
    <p class="desc">장마감 데이터를 기준으로 하루에 1페이지씩 요약 리포트를 제공합니다.</p>
    <p class="meta-line">페이지 구성: 일자별 상승 30 · 하락 30 · 거래 집중도 · 상위 10 분석 카드 · 관련 뉴스</p>
  </section>

  <section id="reports" class="panel">
    <h2>일자별 페이지</h2>
    <div class="cards">
      {cards}
    </div>
  </section>

  <section class="panel">
    <h2>안내</h2>
    <ul class="policy-list">
      <li>리포트는 장마감 데이터 기반 자동 생성입니다.</li>
      <li>종목 코멘트는 등락률과 거래대금 강도를 기준으로 한 요약 텍스트입니다.</li>
      <li>본 사이트는 투자 권유를 제공하지 않습니다.</li>
    </ul>
  </section>

  <footer class="site-footer">
    <p>데이터 출처: KRX 일별 시세(수집 시점 기준)</p>
    <p><a href="/privacy.html">개인정보처리방침</a> | <a href="/terms.html">이용약관</a></p>
    <p>최종 생성일: {today}</p>
  </footer>
</main>"#,
        header = header(cfg),
        cards = cards.join("\n"),
        today = chrono::Local::now().format("%Y-%m-%d"),
    );

    page(
        cfg,
        &format!("{} | 한국 주식 상승·하락 30 일자별 분석", cfg.site_name),
        "한국 주식시장의 일자별 상승 30개, 하락 30개 종목 분석 블로그",
        &body,
    )
}

/// sitemap.xml. 루트/정책 페이지 + 아카이브의 모든 리포트 경로.
pub fn sitemap(cfg: &SiteConfig, report_paths: &[String]) -> String {
    let mut urls: Vec<String> = vec![
        "/".to_string(),
        "/privacy.html".to_string(),
        "/terms.html".to_string(),
    ];
    urls.extend(report_paths.iter().map(|p| format!("/{}", p)));

    let rows: Vec<String> = urls
        .iter()
        .map(|u| {
            format!(
                "  <url>\n    <loc>{}{}</loc>\n    <changefreq>daily</changefreq>\n    <priority>0.8</priority>\n  </url>",
                cfg.site_url, u
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>\n",
        rows.join("\n")
    )
}
