//! 编译后模式模型
//! 正则编译后的结构，构建后只读，可跨线程共享

use std::sync::Arc;

/// 匹配器
#[derive(Debug, Clone)]
pub enum Matcher {
    Regex(regex::Regex),            // 标准正则（无环视，线性时间）
    LookAround(fancy_regex::Regex), // 含环视的正则（回溯引擎）
}

impl Matcher {
    /// 统计文本中不重叠匹配的次数
    pub fn count_matches(&self, input: &str) -> usize {
        match self {
            Matcher::Regex(regex) => regex.find_iter(input).count(),
            // 回溯超限视为本次匹配终止，不影响单条记录分类
            Matcher::LookAround(regex) => regex.find_iter(input).take_while(|m| m.is_ok()).count(),
        }
    }

    /// 原始正则
    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Regex(r) => r.as_str(),
            Matcher::LookAround(r) => r.as_str(),
        }
    }

    /// 规则描述
    pub fn describe(&self) -> &'static str {
        match self {
            Matcher::Regex(_) => "regex",
            Matcher::LookAround(_) => "look_around",
        }
    }
}

/// 编译后的正则模式
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub matcher: Matcher,
}

impl CompiledPattern {
    pub fn count_matches(&self, input: &str) -> usize {
        self.matcher.count_matches(input)
    }
}

/// 一组正则的匹配总次数
pub fn total_matches(patterns: &[CompiledPattern], input: &str) -> usize {
    patterns.iter().map(|p| p.count_matches(input)).sum()
}

/// 编译后的子分类
#[derive(Debug, Clone)]
pub struct CompiledSubcategory {
    pub name: String,
    pub patterns: Vec<CompiledPattern>,
    pub weight: u32,
}

impl CompiledSubcategory {
    /// 加权得分 = 匹配次数 × 权重
    pub fn score(&self, input: &str) -> usize {
        total_matches(&self.patterns, input) * self.weight as usize
    }
}

/// 编译后的主分类
#[derive(Debug, Clone)]
pub struct CompiledCategory {
    pub name: String,
    pub patterns: Vec<CompiledPattern>,
    pub subcategories: Vec<CompiledSubcategory>,
    pub scored: bool,
}

impl CompiledCategory {
    pub fn score(&self, input: &str) -> usize {
        total_matches(&self.patterns, input)
    }
}

/// 编译后的标题关键词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledKeyword {
    pub keyword: String,
    pub category: String,
    pub unless: Option<String>,
}

/// 编译后的规则表
#[derive(Debug, Clone)]
pub struct CompiledRuleTable {
    pub version: Option<String>,
    pub keywords: Arc<Vec<CompiledKeyword>>,
    pub categories: Arc<Vec<CompiledCategory>>,
}

impl CompiledRuleTable {
    /// 参与加权打分的主分类（保持规则表顺序）
    pub fn scored_categories(&self) -> impl Iterator<Item = &CompiledCategory> {
        self.categories.iter().filter(|c| c.scored)
    }
}
