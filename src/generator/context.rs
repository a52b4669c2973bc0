// generator/context.rs - 生成计划所用的日期上下文

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// 生成计划文件时的日期上下文
///
/// 所有和日期相关的替换值都从这里取，生成时间也由调用方传入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanContext {
    /// 计划对应的日期
    pub date: NaiveDate,
    /// 生成时间，填入 `YYYY-MM-DD HH:mm`
    pub generated_at: NaiveDateTime,
    /// 模板中代表年份的占位文本
    pub year_placeholder: String,
}

impl PlanContext {
    pub fn new(date: NaiveDate, generated_at: NaiveDateTime) -> Self {
        Self {
            date,
            generated_at,
            year_placeholder: "2024".to_string(),
        }
    }

    pub fn with_year_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.year_placeholder = placeholder.into();
        self
    }

    /// 本周一
    pub fn week_start(&self) -> NaiveDate {
        self.date - Duration::days(self.date.weekday().num_days_from_monday() as i64)
    }

    /// 周一到周日
    pub fn week_days(&self) -> [NaiveDate; 7] {
        let monday = self.week_start();
        std::array::from_fn(|i| monday + Duration::days(i as i64))
    }

    /// ISO 周年份和周数
    pub fn iso_week(&self) -> (i32, u32) {
        let week = self.date.iso_week();
        (week.year(), week.week())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(y: i32, m: u32, d: u32) -> PlanContext {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        PlanContext::new(date, date.and_hms_opt(8, 30, 0).unwrap())
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-09-03 是星期三
        let c = ctx(2025, 9, 3);
        assert_eq!(c.week_start(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(c.week_days()[6], NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
    }

    #[test]
    fn iso_week_crosses_year_boundary() {
        // 2024-12-30 属于 2025 年第 1 周
        assert_eq!(ctx(2024, 12, 30).iso_week(), (2025, 1));
        assert_eq!(ctx(2025, 9, 2).iso_week(), (2025, 36));
    }
}
