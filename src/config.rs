// 配置模块 - 支持外部配置文件
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlanResult;
use crate::scanner::DiscoveryMode;

/// 默认配置文件路径
pub const CONFIG_FILE: &str = "./config.toml";

/// 内置的默认配置文件内容
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml");

// ============== 配置结构体 ==============

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub scan: ScanConfig,
    pub display: DisplayConfig,
    pub artifact: ArtifactConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    pub plans_root: String,
    /// 模板目录名，扫描时在任意层级跳过
    pub template_dir: String,
    pub script_output: String,
    pub json_output: String,
    pub publish_target: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    /// 日期发现方式
    pub mode: DiscoveryMode,
    /// 支持的文件扩展名（空表示不限）
    pub extensions: Vec<String>,
    /// 是否跳过隐藏文件
    pub skip_hidden: bool,
    /// 是否跟随符号链接
    pub follow_symlinks: bool,
    /// 最大遍历深度 (0 表示无限制)
    pub max_depth: usize,
    /// 自定义忽略模式 (glob)
    pub custom_ignore_patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub preview_max_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArtifactConfig {
    pub declaration: String,
    pub variable: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    pub daily_template: String,
    pub weekly_template: String,
    pub year_placeholder: String,
}

// ============== 默认配置 ==============

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            plans_root: "./daily-plans".to_string(),
            template_dir: "templates".to_string(),
            script_output: "./nav-data.js".to_string(),
            json_output: "./nav-data.json".to_string(),
            publish_target: "./index.html".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: DiscoveryMode::Filename,
            extensions: vec!["md".to_string()],
            skip_hidden: true,
            follow_symlinks: false,
            max_depth: 0,
            custom_ignore_patterns: vec![
                "*.tmp".to_string(),
                "*.swp".to_string(),
                "*~".to_string(),
            ],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { preview_max_length: 200 }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            declaration: "const".to_string(),
            variable: "plansData".to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            daily_template: "daily-template.md".to_string(),
            weekly_template: "weekly-template.md".to_string(),
            year_placeholder: "2024".to_string(),
        }
    }
}

// ============== 配置加载 ==============

impl AppConfig {
    /// 从配置文件加载，文件不存在或解析失败则使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }
        Self::load_from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "无法加载配置文件，使用默认配置");
            Self::default()
        })
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PlanResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PlanResult<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// 生成默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> PlanResult<()> {
        fs::write(path, DEFAULT_CONFIG_TOML)?;
        Ok(())
    }

    pub fn plans_root(&self) -> PathBuf {
        PathBuf::from(&self.paths.plans_root)
    }

    /// 模板文件所在目录
    pub fn template_root(&self) -> PathBuf {
        self.plans_root().join(&self.paths.template_dir)
    }
}
