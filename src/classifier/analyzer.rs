//! 分类分析器：三个阶段依次执行，先命中者决定结果
//! 1. 标题关键词快速匹配
//! 2. 二手商品判定
//! 3. 全文加权正则打分
use tracing::debug;

use super::record::{
    ClassificationResult, DEFAULT_SUBCATEGORY, GENERAL_SUBCATEGORY, PREVIOUSLY_OWNED_JEWELRY,
    PREVIOUSLY_OWNED_WATCHES,
};
use crate::compiler::{CompiledKeyword, CompiledRuleTable};

/// 标题关键词分析器
pub struct TitleKeywordAnalyzer;

impl TitleKeywordAnalyzer {
    /// 在规范化标题中查找关键词，最早出现者决定主分类
    /// 出现位置相同时按关键词表顺序取先者
    pub fn analyze(table: &CompiledRuleTable, title: &str) -> Option<ClassificationResult> {
        let matches = Self::find_keywords(&table.keywords, title);
        let (_, winner) = matches.iter().min_by_key(|(pos, _)| *pos)?;

        let subcategory = Self::refine_subcategory(&winner.category, title, &matches);
        debug!(
            "标题关键词命中：关键词={}，分类={}，子分类={}",
            winner.keyword, winner.category, subcategory
        );
        Some(ClassificationResult::new(winner.category.clone(), subcategory))
    }

    /// 查找所有命中的关键词及首次出现位置（保持关键词表顺序）
    fn find_keywords<'a>(keywords: &'a [CompiledKeyword], title: &str) -> Vec<(usize, &'a CompiledKeyword)> {
        keywords
            .iter()
            .filter(|kw| match &kw.unless {
                Some(unless) => !title.contains(unless.as_str()),
                None => true,
            })
            .filter_map(|kw| title.find(kw.keyword.as_str()).map(|pos| (pos, kw)))
            .collect()
    }

    /// 子分类细化：项链看是否命中 chain，耳环依次看 hoop / stud / drop|dangle
    fn refine_subcategory(category: &str, title: &str, matches: &[(usize, &CompiledKeyword)]) -> &'static str {
        match category {
            "Necklaces" => {
                if matches.iter().any(|(_, kw)| kw.keyword == "chain") {
                    "Chains"
                } else {
                    DEFAULT_SUBCATEGORY
                }
            }
            "Earrings" => {
                if title.contains("hoop") {
                    "Hoops"
                } else if title.contains("stud") {
                    "Stud"
                } else if title.contains("drop") || title.contains("dangle") {
                    "Drop"
                } else {
                    DEFAULT_SUBCATEGORY
                }
            }
            _ => DEFAULT_SUBCATEGORY,
        }
    }
}

/// 二手商品分析器
pub struct PreviouslyOwnedAnalyzer;

impl PreviouslyOwnedAnalyzer {
    pub fn analyze(combined: &str) -> Option<ClassificationResult> {
        if !combined.contains("previously owned") {
            return None;
        }

        let main_category = if combined.contains("watch") {
            PREVIOUSLY_OWNED_WATCHES
        } else {
            PREVIOUSLY_OWNED_JEWELRY
        };
        debug!("二手商品命中：分类={}", main_category);
        Some(ClassificationResult::new(main_category, GENERAL_SUBCATEGORY))
    }
}

/// 加权正则打分器
pub struct PatternScorer;

impl PatternScorer {
    /// 主分类得分为各正则匹配次数之和，严格大于当前最高分才替换（平分时先出现者胜）
    /// 每次替换主分类时重新选择其子分类，保证子分类始终属于最终主分类
    pub fn analyze(table: &CompiledRuleTable, combined: &str) -> ClassificationResult {
        let mut best: Option<(&str, Option<&str>)> = None;
        let mut best_main_score = 0;

        for category in table.scored_categories() {
            let score = category.score(combined);
            if score <= best_main_score {
                continue;
            }
            best_main_score = score;

            let mut best_sub = None;
            let mut best_sub_score = 0;
            for sub in &category.subcategories {
                let sub_score = sub.score(combined);
                if sub_score > best_sub_score {
                    best_sub_score = sub_score;
                    best_sub = Some(sub.name.as_str());
                }
            }

            debug!(
                "加权打分更新：分类={}，得分={}，子分类={:?}，子分类得分={}",
                category.name, score, best_sub, best_sub_score
            );
            best = Some((category.name.as_str(), best_sub));
        }

        match best {
            Some((main, sub)) => ClassificationResult::new(main, sub.unwrap_or(DEFAULT_SUBCATEGORY)),
            None => ClassificationResult::uncategorized(),
        }
    }
}
