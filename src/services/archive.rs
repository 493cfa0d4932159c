use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::report::ReportRecord;

/// 날짜 → 리포트 요약 레코드의 누적 아카이브.
/// 실행마다 이번에 (재)계산한 날짜만 덮어쓰고, 기존 날짜는 절대 지우지 않는다.
pub struct Archive {
    path: PathBuf,
    records: BTreeMap<String, ReportRecord>,
}

impl Archive {
    /// 파일이 없거나 내용이 깨져 있으면 빈 아카이브로 시작한다 (오류 아님).
    pub fn load(path: &Path) -> Self {
        let records = match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, ReportRecord>>(&text) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!("아카이브 파싱 실패, 빈 아카이브로 시작: {}", e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: path.to_path_buf(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&ReportRecord> {
        self.records.get(date)
    }

    /// 이번 실행에서 만든 레코드를 추가/갱신한다. 기존 날짜는 건드리지 않는다.
    pub fn merge(&mut self, new_records: impl IntoIterator<Item = ReportRecord>) {
        for record in new_records {
            self.records.insert(record.date.clone(), record);
        }
    }

    /// 디스크의 reports/*.html 중 아카이브에 없는 날짜에 자리표시 레코드를 만든다.
    /// 이전 실행이 중간에 끊겨도 목록 페이지가 파일시스템과 어긋나지 않게 한다.
    pub fn reconcile_with_disk(&mut self, reports_dir: &Path) -> Result<()> {
        if !reports_dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(reports_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(n) => n,
                None => continue,
            };
            let date = match name.strip_suffix(".html") {
                Some(d) => d,
                None => continue,
            };
            // 파일명이 날짜 형식이 아니면 리포트가 아니다
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                continue;
            }
            if !self.records.contains_key(date) {
                log::info!("아카이브 누락 리포트 발견, 자리표시 레코드 생성: {}", date);
                self.records.insert(date.to_string(), ReportRecord::placeholder(date));
            }
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// 최신일부터 나열 (BTreeMap 은 날짜 문자열 오름차순이므로 역순)
    pub fn records_newest_first(&self) -> Vec<&ReportRecord> {
        self.records.values().rev().collect()
    }

    /// 사이트맵용: 최신일부터의 리포트 경로
    pub fn report_paths_newest_first(&self) -> Vec<String> {
        self.records.values().rev().map(|r| r.path.clone()).collect()
    }
}
