// generator/mod.rs - 计划文件生成器
//! 根据模板生成每日计划和周计划文件。
//!
//! 输出路径跟随扫描的日期发现方式，生成的文件总能被 `PlanScanner` 找到。

mod context;
pub mod template;

pub use context::PlanContext;
pub use template::{render_daily, render_weekly};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::calendar;
use crate::config::AppConfig;
use crate::error::{PlanError, PlanResult};
use crate::scanner::DiscoveryMode;

/// 单个文件的生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Created(PathBuf),
    /// 文件已存在且未要求覆盖
    Skipped(PathBuf),
}

impl GenerateOutcome {
    pub fn path(&self) -> &Path {
        match self {
            GenerateOutcome::Created(p) | GenerateOutcome::Skipped(p) => p,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, GenerateOutcome::Created(_))
    }
}

/// 计划文件生成器
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    root: PathBuf,
    template_root: PathBuf,
    daily_template: String,
    weekly_template: String,
    layout: DiscoveryMode,
    year_placeholder: String,
}

impl PlanGenerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            template_root: root.join("templates"),
            root,
            daily_template: "daily-template.md".to_string(),
            weekly_template: "weekly-template.md".to_string(),
            layout: DiscoveryMode::Filename,
            year_placeholder: "2024".to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            root: config.plans_root(),
            template_root: config.template_root(),
            daily_template: config.generator.daily_template.clone(),
            weekly_template: config.generator.weekly_template.clone(),
            layout: config.scan.mode,
            year_placeholder: config.generator.year_placeholder.clone(),
        }
    }

    pub fn with_layout(mut self, layout: DiscoveryMode) -> Self {
        self.layout = layout;
        self
    }

    /// 为某一天构造上下文
    pub fn context(&self, date: NaiveDate, generated_at: NaiveDateTime) -> PlanContext {
        PlanContext::new(date, generated_at).with_year_placeholder(self.year_placeholder.clone())
    }

    fn month_dir(&self, date: NaiveDate) -> PathBuf {
        let month = match self.layout {
            DiscoveryMode::Filename => calendar::month_dir_name(date),
            DiscoveryMode::Directory => format!("{:02}", date.month()),
        };
        self.root.join(format!("{:04}", date.year())).join(month)
    }

    pub fn daily_path(&self, date: NaiveDate) -> PathBuf {
        let file_name = match self.layout {
            DiscoveryMode::Filename => format!("{}.md", date.format("%Y-%m-%d")),
            DiscoveryMode::Directory => format!("{:02}.md", date.day()),
        };
        self.month_dir(date).join(file_name)
    }

    pub fn weekly_path(&self, ctx: &PlanContext) -> PathBuf {
        let (iso_year, week) = ctx.iso_week();
        self.month_dir(ctx.week_start())
            .join(format!("{}-{:02}-week-summary.md", iso_year, week))
    }

    fn read_template(&self, name: &str) -> PlanResult<String> {
        let path = self.template_root.join(name);
        if !path.is_file() {
            return Err(PlanError::TemplateMissing(path));
        }
        Ok(fs::read_to_string(&path)?)
    }

    pub fn generate_daily(&self, ctx: &PlanContext, overwrite: bool) -> PlanResult<GenerateOutcome> {
        let template = self.read_template(&self.daily_template)?;
        self.write_daily(&template, ctx, overwrite)
    }

    pub fn generate_weekly(&self, ctx: &PlanContext, overwrite: bool) -> PlanResult<GenerateOutcome> {
        let template = self.read_template(&self.weekly_template)?;
        let path = self.weekly_path(ctx);
        write_plan(&path, &render_weekly(&template, ctx), overwrite)
    }

    /// 生成 [start, end] 范围内的每日计划，模板只读取一次
    pub fn generate_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        generated_at: NaiveDateTime,
        overwrite: bool,
    ) -> PlanResult<Vec<GenerateOutcome>> {
        if start > end {
            return Err(PlanError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let template = self.read_template(&self.daily_template)?;

        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| self.write_daily(&template, &self.context(date, generated_at), overwrite))
            .collect()
    }

    fn write_daily(&self, template: &str, ctx: &PlanContext, overwrite: bool) -> PlanResult<GenerateOutcome> {
        let path = self.daily_path(ctx.date);
        write_plan(&path, &render_daily(template, ctx), overwrite)
    }
}

fn write_plan(path: &Path, content: &str, overwrite: bool) -> PlanResult<GenerateOutcome> {
    if path.exists() && !overwrite {
        tracing::info!(path = %path.display(), "文件已存在，跳过");
        return Ok(GenerateOutcome::Skipped(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "已生成计划文件");
    Ok(GenerateOutcome::Created(path.to_path_buf()))
}

/// 解析 `YYYY-MM-DD`
pub fn parse_date(input: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlanScanner;
    use tempfile::tempdir;

    const DAILY: &str = "---\ntitle: \"[日期] 每日计划\"\ncategories: [daily-plan, 2024]\n---\n# YYYY年MM月DD日 星期X\n";

    fn setup(layout: DiscoveryMode) -> (tempfile::TempDir, PlanGenerator) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("daily-plans");
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::write(root.join("templates/daily-template.md"), DAILY).unwrap();
        fs::write(root.join("templates/weekly-template.md"), "# 第X周\n(MM-DD)").unwrap();
        (dir, PlanGenerator::new(root).with_layout(layout))
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn daily_paths_follow_layout() {
        let (_dir, generator) = setup(DiscoveryMode::Filename);
        assert!(generator.daily_path(at(2025, 9, 2)).ends_with("2025/09-September/2025-09-02.md"));

        let generator = generator.with_layout(DiscoveryMode::Directory);
        assert!(generator.daily_path(at(2025, 9, 2)).ends_with("2025/09/02.md"));
    }

    #[test]
    fn generated_daily_plan_is_discoverable() {
        for layout in [DiscoveryMode::Filename, DiscoveryMode::Directory] {
            let (_dir, generator) = setup(layout);
            let date = at(2025, 9, 2);
            let outcome = generator.generate_daily(&generator.context(date, noon(date)), false).unwrap();
            assert!(outcome.is_created());

            let index = PlanScanner::new(layout).scan(&generator.root);
            let entry = index.get("2025", "09", "02").unwrap();
            assert_eq!(entry.title, "2025年09月02日 每日计划");
            assert_eq!(index.len(), 1, "templates must not be indexed");
        }
    }

    #[test]
    fn existing_file_is_skipped_unless_overwrite() {
        let (_dir, generator) = setup(DiscoveryMode::Filename);
        let date = at(2025, 9, 2);
        let ctx = generator.context(date, noon(date));
        let path = generator.daily_path(date);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "手写内容").unwrap();

        let outcome = generator.generate_daily(&ctx, false).unwrap();
        assert_eq!(outcome, GenerateOutcome::Skipped(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "手写内容");

        assert!(generator.generate_daily(&ctx, true).unwrap().is_created());
        assert!(fs::read_to_string(&path).unwrap().contains("categories: [daily-plan, 2025, September]"));
    }

    #[test]
    fn weekly_plan_goes_to_monday_month() {
        let (_dir, generator) = setup(DiscoveryMode::Filename);
        // 2025-10-02 所在周的周一是 2025-09-29
        let date = at(2025, 10, 2);
        let outcome = generator.generate_weekly(&generator.context(date, noon(date)), false).unwrap();
        assert!(outcome.path().ends_with("2025/09-September/2025-40-week-summary.md"));
        assert_eq!(fs::read_to_string(outcome.path()).unwrap(), "# 第40周\n(09-29)");
    }

    #[test]
    fn range_generates_inclusive_days() {
        let (_dir, generator) = setup(DiscoveryMode::Directory);
        let outcomes = generator
            .generate_range(at(2025, 8, 30), at(2025, 9, 2), noon(at(2025, 8, 29)), false)
            .unwrap();
        assert_eq!(outcomes.iter().filter(|o| o.is_created()).count(), 4);
        assert!(generator.root.join("2025/08/31.md").is_file());
        assert!(generator.root.join("2025/09/02.md").is_file());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let (_dir, generator) = setup(DiscoveryMode::Filename);
        let err = generator
            .generate_range(at(2025, 9, 2), at(2025, 9, 1), noon(at(2025, 9, 1)), false)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidRange { .. }));
    }

    #[test]
    fn missing_template_is_an_error() {
        let dir = tempdir().unwrap();
        let generator = PlanGenerator::new(dir.path());
        let date = at(2025, 9, 2);
        let err = generator.generate_daily(&generator.context(date, noon(date)), false).unwrap_err();
        assert!(matches!(err, PlanError::TemplateMissing(_)));
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2025-09-02").unwrap(), at(2025, 9, 2));
        assert!(matches!(parse_date("2025/09/02"), Err(PlanError::InvalidDate(_))));
    }
}
