// scanner/discovery.rs - 日期发现方式
//! 两种目录布局：文件名中带 `YYYY-MM-DD`，或 `YYYY/MM/DD.md` 分层目录。

use std::path::{Component, Path};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FILENAME_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("filename date pattern")
});

/// 日期发现方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// 文件名中任意位置的 `YYYY-MM-DD`
    #[default]
    Filename,
    /// 相对路径恰好为 `YYYY/MM/DD.<ext>`
    Directory,
}

/// 从路径解析出的日期，键均已补零
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDate {
    pub year: String,
    pub month: String,
    pub day: String,
    pub date: NaiveDate,
}

impl PlanDate {
    /// 不是真实日历日期时返回 None
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            year: format!("{:04}", year),
            month: format!("{:02}", month),
            day: format!("{:02}", day),
            date,
        })
    }
}

impl DiscoveryMode {
    /// 根据相对扫描根目录的路径解析日期
    pub fn parse(&self, rel_path: &Path) -> Option<PlanDate> {
        match self {
            DiscoveryMode::Filename => {
                let name = rel_path.file_name()?.to_str()?;
                date_from_filename(name)
            }
            DiscoveryMode::Directory => date_from_hierarchy(rel_path),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Filename => "filename",
            DiscoveryMode::Directory => "directory",
        }
    }
}

pub fn date_from_filename(name: &str) -> Option<PlanDate> {
    let cap = FILENAME_DATE_PATTERN.captures(name)?;
    let year = cap[1].parse().ok()?;
    let month = cap[2].parse().ok()?;
    let day = cap[3].parse().ok()?;
    PlanDate::new(year, month, day)
}

pub fn date_from_hierarchy(rel_path: &Path) -> Option<PlanDate> {
    let parts: Vec<&str> = rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    let [year_dir, month_dir, file_name] = parts.as_slice() else {
        return None;
    };
    let day_stem = Path::new(file_name).file_stem()?.to_str()?;

    if year_dir.len() != 4 || !is_digits(year_dir) {
        return None;
    }
    if !is_short_number(month_dir) || !is_short_number(day_stem) {
        return None;
    }

    PlanDate::new(year_dir.parse().ok()?, month_dir.parse().ok()?, day_stem.parse().ok()?)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_short_number(s: &str) -> bool {
    (1..=2).contains(&s.len()) && is_digits(s)
}
