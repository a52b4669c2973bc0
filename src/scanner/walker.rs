// scanner/walker.rs - 目录遍历
//! 基于 walkdir 的遍历，负责隐藏文件、模板目录、忽略模式和扩展名过滤。

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub skip_hidden: bool,
    pub follow_symlinks: bool,
    /// 0 表示无限制
    pub max_depth: usize,
    /// 保留的模板目录名
    pub template_dir: String,
    /// 小写扩展名，空表示不限
    pub extensions: Vec<String>,
    pub ignore_patterns: Vec<Pattern>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            follow_symlinks: false,
            max_depth: 0,
            template_dir: "templates".to_string(),
            extensions: vec!["md".to_string()],
            ignore_patterns: Vec::new(),
        }
    }
}

impl WalkOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        let ignore_patterns = config
            .scan
            .custom_ignore_patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "忽略无效的忽略模式");
                    None
                }
            })
            .collect();

        Self {
            skip_hidden: config.scan.skip_hidden,
            follow_symlinks: config.scan.follow_symlinks,
            max_depth: config.scan.max_depth,
            template_dir: config.paths.template_dir.clone(),
            extensions: config.scan.extensions.iter().map(|e| e.to_lowercase()).collect(),
            ignore_patterns,
        }
    }

    /// 是否跳过该条目（目录被跳过时其子树也不会访问）
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if self.skip_hidden && name.starts_with('.') {
            return true;
        }
        if entry.file_type().is_dir() && name == self.template_dir.as_str() {
            return true;
        }
        self.ignore_patterns.iter().any(|p| p.matches(&name))
    }

    /// 检查是否支持该文件类型
    pub fn is_supported(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }
}

/// 收集根目录下所有候选文件，按文件名排序遍历
pub fn collect_candidates(root: &Path, options: &WalkOptions) -> Vec<PathBuf> {
    let max_depth = if options.max_depth == 0 { usize::MAX } else { options.max_depth };

    WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !options.is_excluded(e))
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "遍历目录出错，已跳过");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && options.is_supported(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// 相对路径统一为 `/` 分隔
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
