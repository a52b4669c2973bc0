// models.rs - 索引数据结构
//! `PlanEntry` 是一个计划文件的导航信息，`PlanIndex` 按 年 → 月 → 日 组织所有条目。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 单个计划文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub title: String,
    /// 预览文本，读取失败时为固定占位文本
    #[serde(rename = "content")]
    pub content_preview: String,
    /// 相对扫描根目录的路径，使用 `/` 分隔
    pub file_path: String,
    /// 可直接打开的路径（根目录 + file_path）
    pub full_path: String,
    pub filename: String,
    pub year: String,
    pub month: String,
    pub day: String,
    /// ISO 日期 `YYYY-MM-DD`
    #[serde(rename = "fullDate")]
    pub full_date: String,
    pub weekday: String,
    #[serde(rename = "formattedDate")]
    pub formatted_date: String,
}

pub type DayMap = BTreeMap<String, PlanEntry>;
pub type MonthMap = BTreeMap<String, DayMap>;

/// 年 → 月 → 日 索引
///
/// 键都是补零的字符串，BTreeMap 保证序列化顺序稳定。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanIndex {
    years: BTreeMap<String, MonthMap>,
}

impl PlanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入条目，返回被替换掉的旧条目
    pub fn insert(&mut self, entry: PlanEntry) -> Option<PlanEntry> {
        self.years
            .entry(entry.year.clone())
            .or_default()
            .entry(entry.month.clone())
            .or_default()
            .insert(entry.day.clone(), entry)
    }

    pub fn get(&self, year: &str, month: &str, day: &str) -> Option<&PlanEntry> {
        self.years.get(year)?.get(month)?.get(day)
    }

    pub fn years(&self) -> &BTreeMap<String, MonthMap> {
        &self.years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// 条目总数
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// 按 年、月、日 顺序遍历所有条目
    pub fn entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.years
            .values()
            .flat_map(|months| months.values())
            .flat_map(|days| days.values())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::from_index(self)
    }
}

/// 统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub years: usize,
    pub months: usize,
    pub plans: usize,
    /// (年, 月, 计划数)
    pub per_month: Vec<(String, String, usize)>,
}

impl IndexStats {
    pub fn from_index(index: &PlanIndex) -> Self {
        let mut stats = IndexStats {
            years: index.years.len(),
            ..Default::default()
        };
        for (year, months) in &index.years {
            stats.months += months.len();
            for (month, days) in months {
                stats.plans += days.len();
                stats.per_month.push((year.clone(), month.clone(), days.len()));
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(year: &str, month: &str, day: &str, title: &str) -> PlanEntry {
        PlanEntry {
            title: title.to_string(),
            content_preview: String::new(),
            file_path: format!("{year}/{month}/{day}.md"),
            full_path: format!("daily-plans/{year}/{month}/{day}.md"),
            filename: format!("{day}.md"),
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
            full_date: format!("{year}-{month}-{day}"),
            weekday: String::new(),
            formatted_date: String::new(),
        }
    }

    #[test]
    fn insert_creates_intermediate_maps() {
        let mut index = PlanIndex::new();
        assert!(index.insert(entry("2025", "09", "02", "a")).is_none());
        assert_eq!(index.get("2025", "09", "02").unwrap().title, "a");
        assert!(index.get("2025", "09", "03").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_replaces_same_key() {
        let mut index = PlanIndex::new();
        index.insert(entry("2025", "09", "02", "first"));
        let replaced = index.insert(entry("2025", "09", "02", "second")).unwrap();
        assert_eq!(replaced.title, "first");
        assert_eq!(index.get("2025", "09", "02").unwrap().title, "second");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn stats_count_years_months_and_plans() {
        let mut index = PlanIndex::new();
        index.insert(entry("2024", "12", "31", "a"));
        index.insert(entry("2025", "09", "01", "b"));
        index.insert(entry("2025", "09", "02", "c"));
        index.insert(entry("2025", "10", "01", "d"));

        let stats = index.stats();
        assert_eq!(stats.years, 2);
        assert_eq!(stats.months, 3);
        assert_eq!(stats.plans, 4);
        assert_eq!(stats.per_month[1], ("2025".to_string(), "09".to_string(), 2));
    }

    #[test]
    fn serializes_as_nested_object_with_camel_case_dates() {
        let mut index = PlanIndex::new();
        index.insert(entry("2025", "09", "02", "a"));
        let value = serde_json::to_value(&index).unwrap();
        let plan = &value["2025"]["09"]["02"];
        assert_eq!(plan["title"], "a");
        assert_eq!(plan["file_path"], "2025/09/02.md");
        assert!(plan.get("content").is_some());
        assert!(plan.get("fullDate").is_some());
        assert!(plan.get("content_preview").is_none());
    }
}
