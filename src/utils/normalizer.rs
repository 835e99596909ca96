//! 文本规范化工具
//! 将单个原始字段清洗为小写、单空格分隔的规范文本

use once_cell::sync::Lazy;
use regex::Regex;

/// 表格导出工具产生的无效占位值（去除首尾空白后精确匹配，区分大小写）
const INVALID_SENTINELS: [&str; 4] = ["#NAME?", "nan", "None", "null"];

/// 已知编码残留的字面替换，按顺序执行
/// %25 必须最先处理：%2520 先还原为 %20，再被后续规则替换为空格
const REPLACEMENTS: [(&str, &str); 9] = [
    ("%25", "%"),
    ("%E2%80%9D", "\""),
    ("%C3%B1", "n"),
    ("√±", "n"),
    ("‚Äù", "\""),
    ("%20", " "),
    ("\u{2019}", "'"),
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
];

static PERCENT_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").unwrap());
static DISALLOWED_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s\-&,.]").unwrap());

/// 文本规范化工具
pub struct TextNormalizer;

impl TextNormalizer {
    /// 规范化单个字段，缺失或无效值返回空串
    pub fn normalize(raw: Option<&str>) -> String {
        let Some(text) = raw else {
            return String::new();
        };
        if INVALID_SENTINELS.contains(&text.trim()) {
            return String::new();
        }

        // 1. 修复编码残留
        let mut text = text.to_string();
        for (from, to) in REPLACEMENTS {
            if text.contains(from) {
                text = text.replace(from, to);
            }
        }

        // 2. 移除剩余的百分号转义
        let text = PERCENT_ESCAPE_REGEX.replace_all(&text, " ");

        // 3. 仅保留单词字符、空白、- & , .
        let text = DISALLOWED_CHARS_REGEX.replace_all(&text, " ");

        // 4. 合并空白并转小写
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

        // 转小写后可能恰好得到占位值（如 NaN / NULL），同样视为无效
        if INVALID_SENTINELS.contains(&text.as_str()) {
            return String::new();
        }
        text
    }
}

/// 便捷函数
pub fn normalize(raw: Option<&str>) -> String {
    TextNormalizer::normalize(raw)
}
