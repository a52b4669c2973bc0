// scanner/mod.rs - 计划索引构建
//! 扫描计划目录，为每个带日期的文件生成 `PlanEntry`，组装成 `PlanIndex`。
//!
//! 单个文件的问题（读取失败、日期重复）不会中断扫描，只会记录在 `ScanReport::issues` 里。

mod discovery;
pub mod walker;

pub use discovery::*;
pub use walker::{WalkOptions, collect_candidates, normalize_path};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::calendar;
use crate::config::AppConfig;
use crate::extract::{self, TextExtractor, UNREADABLE_PREVIEW};
use crate::models::{PlanEntry, PlanIndex};

/// 非致命的扫描问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanIssue {
    /// 根目录不存在，返回空索引
    MissingRoot(PathBuf),
    /// 文件读取失败，条目使用占位内容
    Unreadable { path: String, reason: String },
    /// 同一天出现多个文件，后扫描到的覆盖先前的
    Duplicate { key: String, replaced: String, by: String },
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanIssue::MissingRoot(path) => write!(f, "目录 {} 不存在", path.display()),
            ScanIssue::Unreadable { path, reason } => write!(f, "读取文件 {} 时出错: {}", path, reason),
            ScanIssue::Duplicate { key, replaced, by } => {
                write!(f, "日期 {} 重复: {} 被 {} 覆盖", key, replaced, by)
            }
        }
    }
}

/// 一次扫描的完整结果
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub index: PlanIndex,
    pub issues: Vec<ScanIssue>,
    /// 无法解析出日期而跳过的文件数
    pub skipped: usize,
}

impl ScanReport {
    pub fn root_missing(&self) -> bool {
        self.issues.iter().any(|i| matches!(i, ScanIssue::MissingRoot(_)))
    }
}

/// 计划目录扫描器
#[derive(Debug, Clone)]
pub struct PlanScanner {
    mode: DiscoveryMode,
    walk: WalkOptions,
    extractor: TextExtractor,
}

impl Default for PlanScanner {
    fn default() -> Self {
        Self::new(DiscoveryMode::default())
    }
}

impl PlanScanner {
    pub fn new(mode: DiscoveryMode) -> Self {
        Self {
            mode,
            walk: WalkOptions::default(),
            extractor: TextExtractor::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            mode: config.scan.mode,
            walk: WalkOptions::from_config(config),
            extractor: TextExtractor::new(config.display.preview_max_length),
        }
    }

    /// 扫描并只返回索引
    pub fn scan(&self, root: &Path) -> PlanIndex {
        self.scan_report(root).index
    }

    pub fn scan_report(&self, root: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        if !root.is_dir() {
            let issue = ScanIssue::MissingRoot(root.to_path_buf());
            tracing::warn!("{}", issue);
            report.issues.push(issue);
            return report;
        }

        tracing::info!(root = %root.display(), mode = self.mode.as_str(), "开始扫描计划目录");

        for path in collect_candidates(root, &self.walk) {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let Some(date) = self.mode.parse(rel) else {
                tracing::debug!(path = %path.display(), "文件名不含日期，跳过");
                report.skipped += 1;
                continue;
            };

            let entry = self.build_entry(root, rel, &path, &date, &mut report.issues);
            let file_path = entry.file_path.clone();
            if let Some(old) = report.index.insert(entry) {
                let issue = ScanIssue::Duplicate {
                    key: format!("{}-{}-{}", date.year, date.month, date.day),
                    replaced: old.file_path,
                    by: file_path,
                };
                tracing::warn!("{}", issue);
                report.issues.push(issue);
            }
        }

        tracing::info!(
            plans = report.index.len(),
            skipped = report.skipped,
            issues = report.issues.len(),
            "扫描完成"
        );
        report
    }

    fn build_entry(
        &self,
        root: &Path,
        rel: &Path,
        path: &Path,
        date: &PlanDate,
        issues: &mut Vec<ScanIssue>,
    ) -> PlanEntry {
        let file_path = normalize_path(rel);
        let root_str = root.to_string_lossy().replace('\\', "/");
        let full_path = format!("{}/{}", root_str.trim_end_matches('/'), file_path);
        let default_title = || calendar::default_title(&date.year, &date.month, &date.day);

        let (title, content_preview) = match extract::read_plan_text(path) {
            Ok(content) => {
                let extracted = self.extractor.extract(&content);
                (extracted.title.unwrap_or_else(default_title), extracted.preview)
            }
            Err(e) => {
                let issue = ScanIssue::Unreadable {
                    path: file_path.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!("{}", issue);
                issues.push(issue);
                (default_title(), UNREADABLE_PREVIEW.to_string())
            }
        };

        PlanEntry {
            title,
            content_preview,
            filename: rel
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path,
            full_path,
            year: date.year.clone(),
            month: date.month.clone(),
            day: date.day.clone(),
            full_date: date.date.format("%Y-%m-%d").to_string(),
            weekday: calendar::weekday_cn(date.date).to_string(),
            formatted_date: calendar::format_cn_date(date.date),
        }
    }
}
