//! 分类输入输出模型

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::utils::TextNormalizer;

/// 未分类哨兵值
pub const UNCATEGORIZED: &str = "Uncategorized";
/// 默认子分类
pub const DEFAULT_SUBCATEGORY: &str = "Fashion";
/// 二手类固定子分类
pub const GENERAL_SUBCATEGORY: &str = "General";
pub const PREVIOUSLY_OWNED_JEWELRY: &str = "Previously Owned Jewelry";
pub const PREVIOUSLY_OWNED_WATCHES: &str = "Previously Owned Watches";

/// 商品记录（四个字段均可缺失）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: Option<String>,
    pub title: Option<String>,
    pub breadcrumb2: Option<String>,
    pub breadcrumb3: Option<String>,
}

impl ProductRecord {
    /// 仅标题的记录
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// 分类结果（主分类, 子分类），两者均非空
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub main_category: String,
    pub subcategory: String,
}

impl ClassificationResult {
    pub fn new(main_category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            main_category: main_category.into(),
            subcategory: subcategory.into(),
        }
    }

    pub fn uncategorized() -> Self {
        Self::new(UNCATEGORIZED, UNCATEGORIZED)
    }

    pub fn is_uncategorized(&self) -> bool {
        self.main_category == UNCATEGORIZED
    }

    pub fn as_pair(&self) -> (&str, &str) {
        (&self.main_category, &self.subcategory)
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.main_category, self.subcategory)
    }
}

/// 决定分类结果的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    TitleKeyword,
    PreviouslyOwned,
    PatternScore,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::TitleKeyword => "title keyword",
            Phase::PreviouslyOwned => "previously owned",
            Phase::PatternScore => "pattern score",
        };
        f.write_str(name)
    }
}

/// 规范化后的四个字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    pub url: String,
    pub title: String,
    pub breadcrumb2: String,
    pub breadcrumb3: String,
}

impl NormalizedFields {
    pub fn new(url: Option<&str>, title: Option<&str>, breadcrumb2: Option<&str>, breadcrumb3: Option<&str>) -> Self {
        Self {
            url: TextNormalizer::normalize(url),
            title: TextNormalizer::normalize(title),
            breadcrumb2: TextNormalizer::normalize(breadcrumb2),
            breadcrumb3: TextNormalizer::normalize(breadcrumb3),
        }
    }

    /// 合并文本：标题 + 面包屑2 + 面包屑3，以单空格连接（空字段同样保留分隔符）
    pub fn combined(&self) -> String {
        format!("{} {} {}", self.title, self.breadcrumb2, self.breadcrumb3)
    }
}
