// error.rs - 错误类型
//! 致命错误。单个文件的读取失败等非致命问题见 `scanner::ScanIssue`。

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Publish target not readable: {path}: {source}")]
    PublishTargetMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Publish target {path} has no `{variable} = {{ ... }};` region")]
    MarkerNotFound { path: PathBuf, variable: String },

    #[error("Template not found: {0}")]
    TemplateMissing(PathBuf),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
