// main.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use plan_nav::artifact::{self, ArtifactFormat};
use plan_nav::config::{self, AppConfig};
use plan_nav::generator::{self, GenerateOutcome, PlanGenerator};
use plan_nav::scanner::{DiscoveryMode, PlanScanner, ScanReport};
use plan_nav::summary;

#[derive(Parser)]
#[command(name = "plan-nav", about = "每日计划导航数据生成工具")]
struct Cli {
    /// 配置文件路径
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// 计划根目录（覆盖配置文件）
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// 日期发现方式（覆盖配置文件）
    #[arg(long, global = true, value_enum)]
    mode: Option<DiscoveryMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 扫描计划目录并生成导航数据文件
    Scan {
        #[arg(long, value_enum, default_value_t = OutputFormat::Script)]
        format: OutputFormat,
        /// 输出文件（仅 script 或 json 时有效）
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// 扫描并把导航数据写入 HTML 页面
    Publish {
        /// 目标页面（覆盖配置文件）
        #[arg(long)]
        target: Option<PathBuf>,
    },
    /// 列出已有的计划文件
    List,
    /// 根据模板生成计划文件
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },
    /// 写入默认配置文件
    InitConfig {
        /// 覆盖已存在的配置文件
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// 生成每日计划（默认今天）
    Daily {
        /// 日期 YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        overwrite: bool,
    },
    /// 生成周计划（默认本周）
    Weekly {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        overwrite: bool,
    },
    /// 生成日期范围内的每日计划
    Range {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        overwrite: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// const plansData = {...};
    Script,
    /// 纯 JSON
    Json,
    /// 同时输出两种
    Both,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let load_config = || {
        let mut config = AppConfig::load_or_default(&cli.config);
        if let Some(root) = &cli.root {
            config.paths.plans_root = root.to_string_lossy().into_owned();
        }
        if let Some(mode) = cli.mode {
            config.scan.mode = mode;
        }
        config
    };

    match cli.command {
        Commands::InitConfig { force } => init_config(&cli.config, force),
        Commands::Scan { format, output } => run_scan(&load_config(), format, output),
        Commands::Publish { target } => run_publish(&load_config(), target),
        Commands::List => run_list(&load_config()),
        Commands::Generate { command } => run_generate(&load_config(), command),
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("配置文件 {} 已存在，使用 --force 覆盖", path.display());
    }
    AppConfig::generate_default_config(path)
        .with_context(|| format!("无法写入配置文件 {}", path.display()))?;
    println!(" [Config] 默认配置已写入 {}", path.display());
    Ok(())
}

fn scan(config: &AppConfig) -> ScanReport {
    let root = config.plans_root();
    println!(" [扫描] 正在扫描 {} ...", root.display());
    let report = PlanScanner::from_config(config).scan_report(&root);

    for issue in &report.issues {
        println!(" [提示] {}", issue);
    }
    println!(" [扫描] 扫描完成！");
    for line in summary::summary_lines(&report.index.stats()) {
        println!("{}", line);
    }
    report
}

fn run_scan(config: &AppConfig, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    if output.is_some() && format == OutputFormat::Both {
        bail!("--output 不能与 --format both 同时使用");
    }
    let report = scan(config);

    let targets: Vec<(ArtifactFormat, PathBuf)> = match format {
        OutputFormat::Script => vec![(
            ArtifactFormat::script(&config.artifact),
            output.unwrap_or_else(|| PathBuf::from(&config.paths.script_output)),
        )],
        OutputFormat::Json => vec![(
            ArtifactFormat::Json,
            output.unwrap_or_else(|| PathBuf::from(&config.paths.json_output)),
        )],
        OutputFormat::Both => vec![
            (ArtifactFormat::script(&config.artifact), PathBuf::from(&config.paths.script_output)),
            (ArtifactFormat::Json, PathBuf::from(&config.paths.json_output)),
        ],
    };

    for (format, path) in targets {
        let data = artifact::serialize(&report.index, &format)?;
        artifact::write_artifact(&path, &data)
            .with_context(|| format!("无法写入数据文件 {}", path.display()))?;
        println!(" [输出] 导航数据已保存到 {}", path.display());
    }
    Ok(())
}

fn run_publish(config: &AppConfig, target: Option<PathBuf>) -> Result<()> {
    let report = scan(config);
    let target = target.unwrap_or_else(|| PathBuf::from(&config.paths.publish_target));

    artifact::publish(&report.index, &target, &config.artifact.variable)
        .with_context(|| format!("无法更新页面 {}", target.display()))?;
    println!(" [发布] {} 已更新，包含真实的导航数据", target.display());
    Ok(())
}

fn run_list(config: &AppConfig) -> Result<()> {
    let index = PlanScanner::from_config(config).scan(&config.plans_root());
    println!("已存在的计划文件：");
    for line in summary::listing_lines(&index, summary::LISTING_PREVIEW_LIMIT) {
        println!("{}", line);
    }
    Ok(())
}

fn parse_date_or_today(input: Option<&str>) -> Result<NaiveDate> {
    match input {
        Some(s) => Ok(generator::parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn run_generate(config: &AppConfig, command: GenerateCommands) -> Result<()> {
    let generator = PlanGenerator::from_config(config);
    let now = Local::now().naive_local();

    match command {
        GenerateCommands::Daily { date, overwrite } => {
            let date = parse_date_or_today(date.as_deref())?;
            report_outcome(&generator.generate_daily(&generator.context(date, now), overwrite)?);
        }
        GenerateCommands::Weekly { date, overwrite } => {
            let date = parse_date_or_today(date.as_deref())?;
            report_outcome(&generator.generate_weekly(&generator.context(date, now), overwrite)?);
        }
        GenerateCommands::Range { start, end, overwrite } => {
            let start = generator::parse_date(&start)?;
            let end = generator::parse_date(&end)?;
            let outcomes = generator.generate_range(start, end, now, overwrite)?;
            outcomes.iter().for_each(report_outcome);
            let created = outcomes.iter().filter(|o| o.is_created()).count();
            println!(" [生成] 共成功生成 {} 个每日计划文件", created);
        }
    }
    Ok(())
}

fn report_outcome(outcome: &GenerateOutcome) {
    match outcome {
        GenerateOutcome::Created(path) => println!(" [生成] 成功生成：{}", path.display()),
        GenerateOutcome::Skipped(path) => {
            println!(" [生成] 文件已存在，已跳过：{}（使用 --overwrite 覆盖）", path.display())
        }
    }
}
