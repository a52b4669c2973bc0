// summary.rs - 控制台输出
//! 扫描统计和已有计划列表的文本行，由命令行逐行打印。

use crate::calendar;
use crate::models::{IndexStats, PlanIndex};

/// 每个月在列表中最多显示的文件数
pub const LISTING_PREVIEW_LIMIT: usize = 5;

/// 年份数、月份数、计划数，以及每年各月的计划数
pub fn summary_lines(stats: &IndexStats) -> Vec<String> {
    let mut lines = vec![
        format!("年份数: {}", stats.years),
        format!("月份数: {}", stats.months),
        format!("计划数: {}", stats.plans),
    ];

    let mut current_year: Option<&str> = None;
    for (year, month, count) in &stats.per_month {
        if current_year != Some(year.as_str()) {
            lines.push(format!("{}年:", year));
            current_year = Some(year.as_str());
        }
        let month_name = month
            .parse::<u32>()
            .ok()
            .and_then(calendar::month_name_cn)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}月", month));
        lines.push(format!("  {}: {} 个计划", month_name, count));
    }
    lines
}

/// 按年、月列出已有计划，每月最多 `limit` 个文件
pub fn listing_lines(index: &PlanIndex, limit: usize) -> Vec<String> {
    if index.is_empty() {
        return vec!["暂无计划文件".to_string()];
    }

    let mut lines = Vec::new();
    for (year, months) in index.years() {
        lines.push(format!("{}年:", year));
        for (month, days) in months {
            lines.push(format!("  {}月: {} 个文件", month, days.len()));
            for entry in days.values().take(limit) {
                lines.push(format!("    {}", entry.file_path));
            }
            if days.len() > limit {
                lines.push(format!("    ... 还有 {} 个文件", days.len() - limit));
            }
        }
    }
    lines
}
