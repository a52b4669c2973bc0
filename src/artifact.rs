// artifact.rs - 索引序列化与发布
//! 把 `PlanIndex` 序列化为脚本数据文件或纯 JSON，并可写回 HTML 页面中的数据区域。

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use regex::Regex;

use crate::config::ArtifactConfig;
use crate::error::{PlanError, PlanResult};
use crate::models::PlanIndex;

/// 序列化格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `const plansData = {...};`，可直接用 `<script>` 引入
    Script { declaration: String, variable: String },
    /// 纯 JSON 文档
    Json,
}

impl ArtifactFormat {
    pub fn script(config: &ArtifactConfig) -> Self {
        ArtifactFormat::Script {
            declaration: config.declaration.clone(),
            variable: config.variable.clone(),
        }
    }
}

/// 两空格缩进的 JSON，非 ASCII 字符原样输出
pub fn to_pretty_json(index: &PlanIndex) -> PlanResult<String> {
    Ok(serde_json::to_string_pretty(index)?)
}

/// 序列化索引，输出只取决于索引内容
pub fn serialize(index: &PlanIndex, format: &ArtifactFormat) -> PlanResult<String> {
    let json = to_pretty_json(index)?;
    Ok(match format {
        ArtifactFormat::Script { declaration, variable } => {
            if declaration.is_empty() {
                format!("{} = {};", variable, json)
            } else {
                format!("{} {} = {};", declaration, variable, json)
            }
        }
        ArtifactFormat::Json => json,
    })
}

/// 写入数据文件（先写临时文件再重命名）
pub fn write_artifact(path: &Path, artifact: &str) -> PlanResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_atomic(path, artifact.as_bytes())
}

fn marker_pattern(variable: &str) -> PlanResult<Regex> {
    let pattern = format!(
        r"(?:\b(?:const|let|var)\s+)?\b{}\s*=\s*\{{",
        regex::escape(variable)
    );
    Ok(Regex::new(&pattern)?)
}

/// `literal` 以 `{` 开头，返回与之匹配的 `}` 之后的字节偏移
///
/// 引号内的括号不计入层数，反斜杠转义下一个字符。
fn object_literal_end(literal: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in literal.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// 替换文档中 `variable = { ... };` 区域，返回替换后的文本
///
/// 原有的 `const`/`let`/`var` 前缀保持不变，区域外的内容逐字节保留。
/// 文档中没有该区域时返回 None。
pub fn splice(document: &str, variable: &str, json: &str) -> PlanResult<Option<String>> {
    let pattern = marker_pattern(variable)?;
    let mut updated = String::with_capacity(document.len() + json.len());
    let mut copied = 0;
    let mut search = 0;
    let mut found = false;

    while let Some(m) = pattern.find_at(document, search) {
        let open = m.end() - 1;
        match object_literal_end(&document[open..]) {
            Some(len) if document[open + len..].starts_with(';') => {
                updated.push_str(&document[copied..open]);
                updated.push_str(json);
                copied = open + len;
                search = copied;
                found = true;
            }
            _ => search = m.end(),
        }
    }

    if !found {
        return Ok(None);
    }
    updated.push_str(&document[copied..]);
    Ok(Some(updated))
}

/// 把索引写入目标页面的数据区域
///
/// 读取失败或找不到数据区域时返回错误，目标文件保持不变。
pub fn publish(index: &PlanIndex, target: &Path, variable: &str) -> PlanResult<()> {
    let document = fs::read_to_string(target).map_err(|source| PlanError::PublishTargetMissing {
        path: target.to_path_buf(),
        source,
    })?;

    let json = to_pretty_json(index)?;
    let updated = splice(&document, variable, &json)?.ok_or_else(|| PlanError::MarkerNotFound {
        path: target.to_path_buf(),
        variable: variable.to_string(),
    })?;

    if updated != document {
        write_atomic(target, updated.as_bytes())?;
    }
    tracing::info!(target = %target.display(), "页面数据已更新");
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> PlanResult<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let tmp = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("artifact"),
        std::process::id()
    ));

    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
