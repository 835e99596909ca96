//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化
//! 所有集合均为有序列表，遍历顺序即平分时的优先顺序

use serde::{Deserialize, Serialize};

/// 子分类规则
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubcategoryRule {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    // 匹配次数的乘数，必须为正数（编译期校验）
    pub weight: i64,
}

/// 主分类规则
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MainCategoryRule {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<SubcategoryRule>,
    // false：不参与加权打分（二手类由专用阶段处理）
    #[serde(default = "default_scored", skip_serializing_if = "is_scored")]
    pub scored: bool,
}

fn default_scored() -> bool {
    true
}

fn is_scored(scored: &bool) -> bool {
    *scored
}

/// 标题关键词（标题快速匹配阶段）
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TitleKeyword {
    pub keyword: String,
    pub category: String,
    // 标题包含该子串时忽略此关键词（如 ring / earring）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
}

/// 完整规则表
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleTable {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub title_keywords: Vec<TitleKeyword>,
    pub categories: Vec<MainCategoryRule>,
}

impl RuleTable {
    /// 规则表中正则总数（主分类 + 子分类）
    pub fn pattern_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.patterns.len() + c.subcategories.iter().map(|s| s.patterns.len()).sum::<usize>())
            .sum()
    }
}
