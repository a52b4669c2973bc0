// calendar.rs - 日期显示工具
//! 中文星期、月份名称和日期格式化

use chrono::{Datelike, NaiveDate};

const WEEKDAYS_CN: [&str; 7] = ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"];

const MONTHS_CN: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月",
    "七月", "八月", "九月", "十月", "十一月", "十二月",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// 星期几（星期一 .. 星期日）
pub fn weekday_cn(date: NaiveDate) -> &'static str {
    WEEKDAYS_CN[date.weekday().num_days_from_monday() as usize]
}

/// 中文月份名，`month` 取 1..=12
pub fn month_name_cn(month: u32) -> Option<&'static str> {
    MONTHS_CN.get(month.checked_sub(1)? as usize).copied()
}

pub fn month_name_en(month: u32) -> Option<&'static str> {
    MONTHS_EN.get(month.checked_sub(1)? as usize).copied()
}

/// `2025年09月02日`
pub fn format_cn_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

/// 生成器按文件名模式写入时使用的月份目录名，例如 `09-September`
pub fn month_dir_name(date: NaiveDate) -> String {
    let name = month_name_en(date.month()).unwrap_or_default();
    format!("{:02}-{}", date.month(), name)
}

/// 没有 title 元数据时的默认标题
pub fn default_title(year: &str, month: &str, day: &str) -> String {
    format!("{}年{}月{}日 - 每日计划", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_of_known_date() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        assert_eq!(weekday_cn(date), "星期二");
        let sunday = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        assert_eq!(weekday_cn(sunday), "星期日");
    }

    #[test]
    fn month_names_are_bounded() {
        assert_eq!(month_name_cn(1), Some("一月"));
        assert_eq!(month_name_cn(12), Some("十二月"));
        assert_eq!(month_name_cn(0), None);
        assert_eq!(month_name_cn(13), None);
        assert_eq!(month_name_en(9), Some("September"));
    }

    #[test]
    fn formats_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(format_cn_date(date), "2025年03月04日");
        assert_eq!(month_dir_name(date), "03-March");
        assert_eq!(default_title("2025", "09", "02"), "2025年09月02日 - 每日计划");
    }
}
