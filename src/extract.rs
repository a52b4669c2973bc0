use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

/// 读取失败时的预览占位文本
pub const UNREADABLE_PREVIEW: &str = "无法读取内容";

static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // title: "..." 或 title: '...'
    Regex::new(r#"title:\s*["']([^"']+)["']"#).expect("title pattern")
});

static FRONT_MATTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---.*?---").expect("front matter pattern")
});

/// 预览中移除的 markdown 标记字符
const MARKDOWN_MARKS: [char; 6] = ['#', '*', '`', '-', '[', ']'];

/// 从文件内容提取出的元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: Option<String>,
    pub preview: String,
}

/// 读取计划文件文本
pub fn read_plan_text(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path)
}

/// 提取 `title: "..."` 元数据字段
pub fn extract_title(content: &str) -> Option<String> {
    TITLE_PATTERN
        .captures(content)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// 去掉开头的 `---` front matter 块
pub fn strip_front_matter(content: &str) -> &str {
    match FRONT_MATTER_PATTERN.find(content) {
        Some(m) => &content[m.end()..],
        None => content,
    }
}

pub fn format_content_preview(content: &str, preview_max_length: usize) -> String {
    let body = strip_front_matter(content).trim();
    let cleaned: String = body.chars().filter(|c| !MARKDOWN_MARKS.contains(c)).collect();
    // 去掉标记后再 trim 一次，`# 标题` 得到 `标题`
    let cleaned = cleaned.trim();

    // 按字符截断，保证不切断 UTF-8 字符
    match cleaned.char_indices().nth(preview_max_length) {
        Some((end, _)) => format!("{}...", &cleaned[..end]),
        None => cleaned.to_string(),
    }
}

/// 文本提取器（封装标题和预览提取）
#[derive(Debug, Clone)]
pub struct TextExtractor {
    preview_max_length: usize,
}

impl TextExtractor {
    pub fn new(preview_max_length: usize) -> Self {
        Self { preview_max_length }
    }

    pub fn extract(&self, content: &str) -> ExtractedText {
        ExtractedText {
            title: extract_title(content),
            preview: format_content_preview(content, self.preview_max_length),
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(200)
    }
}
