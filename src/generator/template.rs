// generator/template.rs - 模板占位符替换

use chrono::Datelike;

use super::context::PlanContext;
use crate::calendar;

/// 每日计划模板替换
///
/// 替换按固定顺序进行：分类行先于单独的年份占位符，年份占位符先于生成的日期值，
/// 带时间的日期先于纯日期。
pub fn render_daily(template: &str, ctx: &PlanContext) -> String {
    let date = ctx.date;
    let cn_date = calendar::format_cn_date(date);
    let month_name = calendar::month_name_en(date.month()).unwrap_or_default();

    let mut replacements: Vec<(String, String)> = Vec::new();
    if !ctx.year_placeholder.is_empty() {
        replacements.push((
            format!("categories: [daily-plan, {}]", ctx.year_placeholder),
            format!("categories: [daily-plan, {}, {}]", date.year(), month_name),
        ));
        replacements.push((ctx.year_placeholder.clone(), date.year().to_string()));
    }
    replacements.push((
        "YYYY-MM-DD HH:mm".to_string(),
        ctx.generated_at.format("%Y-%m-%d %H:%M").to_string(),
    ));
    replacements.push((
        "YYYY年MM月DD日 星期X".to_string(),
        format!("{} {}", cn_date, calendar::weekday_cn(date)),
    ));
    replacements.push(("[日期]".to_string(), cn_date));
    replacements.push(("YYYY-MM-DD".to_string(), date.format("%Y-%m-%d").to_string()));

    replacements
        .iter()
        .fold(template.to_string(), |content, (from, to)| content.replace(from, to))
}

/// 周计划模板替换
pub fn render_weekly(template: &str, ctx: &PlanContext) -> String {
    let (_, week_num) = ctx.iso_week();
    let days = ctx.week_days();
    let (monday, sunday) = (days[0], days[6]);

    let mut content = template.replace("第X周", &format!("第{}周", week_num));
    content = content.replace(
        "YYYY年MM月DD日 - MM月DD日",
        &format!("{} - {}", calendar::format_cn_date(monday), sunday.format("%m月%d日")),
    );

    // 每天一个 (MM-DD)，按周一到周日依次填入
    for day in days {
        content = content.replacen("(MM-DD)", &day.format("(%m-%d)").to_string(), 1);
    }

    content.replace(
        "YYYY-MM-DD HH:mm",
        &ctx.generated_at.format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> PlanContext {
        let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        let generated_at = NaiveDate::from_ymd_opt(2025, 8, 30)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap();
        PlanContext::new(date, generated_at)
    }

    #[test]
    fn daily_placeholders() {
        let template = "---\ntitle: \"[日期] 计划\"\ndate: YYYY-MM-DD\nupdated: YYYY-MM-DD HH:mm\n---\n# YYYY年MM月DD日 星期X\n";
        let out = render_daily(template, &ctx());
        assert_eq!(
            out,
            "---\ntitle: \"2025年09月02日 计划\"\ndate: 2025-09-02\nupdated: 2025-08-30 21:05\n---\n# 2025年09月02日 星期二\n"
        );
    }

    #[test]
    fn categories_line_replaced_before_bare_year() {
        let template = "categories: [daily-plan, 2024]\nyear: 2024\n";
        let out = render_daily(template, &ctx());
        assert_eq!(out, "categories: [daily-plan, 2025, September]\nyear: 2025\n");
    }

    #[test]
    fn generated_timestamp_keeps_its_year() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let generated_at = NaiveDate::from_ymd_opt(2024, 12, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let out = render_daily("updated: YYYY-MM-DD HH:mm", &PlanContext::new(date, generated_at));
        assert_eq!(out, "updated: 2024-12-30 09:00");
    }

    #[test]
    fn custom_year_placeholder() {
        let template = "year: {{year}}\nkeep: 2024\n";
        let out = render_daily(template, &ctx().with_year_placeholder("{{year}}"));
        assert_eq!(out, "year: 2025\nkeep: 2024\n");
    }

    #[test]
    fn empty_year_placeholder_is_ignored() {
        let out = render_daily("abc", &ctx().with_year_placeholder(""));
        assert_eq!(out, "abc");
    }

    #[test]
    fn weekly_placeholders() {
        let mut template = String::from("# 第X周 YYYY年MM月DD日 - MM月DD日\n");
        for _ in 0..7 {
            template.push_str("- (MM-DD)\n");
        }
        template.push_str("- (MM-DD)\nupdated: YYYY-MM-DD HH:mm");

        let out = render_weekly(&template, &ctx());
        assert!(out.starts_with("# 第36周 2025年09月01日 - 09月07日\n"));
        assert!(out.contains("- (09-01)\n- (09-02)\n"));
        assert!(out.contains("- (09-07)\n- (MM-DD)\n"));
        assert!(out.ends_with("updated: 2025-08-30 21:05"));
    }
}
