//! 规则编译器核心
//! 负责校验规则表并将原始规则编译为可执行的正则模式
//! 任何配置错误都在此处暴露，分类阶段不会再出现规则错误

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::pattern::{
    CompiledCategory, CompiledKeyword, CompiledPattern, CompiledRuleTable, CompiledSubcategory, Matcher,
};
use crate::error::{CatResult, CategorizerError, PatternErrorKind};
use crate::rule::{MainCategoryRule, RuleTable, SubcategoryRule, TitleKeyword};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则表
    pub fn compile(table: &RuleTable) -> CatResult<CompiledRuleTable> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        // 1. 编译主分类（含重名校验）
        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(table.categories.len());
        for rule in &table.categories {
            if rule.name.trim().is_empty() {
                return Err(CategorizerError::EmptyRuleField("main category name".to_string()));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(CategorizerError::DuplicateCategory(rule.name.clone()));
            }
            categories.push(Self::compile_category(rule, &mut stats)?);
        }

        // 2. 编译标题关键词
        let keywords = table
            .title_keywords
            .iter()
            .map(|kw| Self::compile_keyword(kw, &seen))
            .collect::<CatResult<Vec<_>>>()?;

        // 3. 输出编译统计
        debug!("✅ 规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：主分类{}个、子分类{}个、标准正则{}条、环视正则{}条、标题关键词{}个",
            stats.category_count,
            stats.subcategory_count,
            stats.regex_count,
            stats.look_around_count,
            keywords.len()
        );

        Ok(CompiledRuleTable {
            version: table.version.clone(),
            keywords: Arc::new(keywords),
            categories: Arc::new(categories),
        })
    }

    /// 编译单个主分类
    fn compile_category(rule: &MainCategoryRule, stats: &mut CompileStats) -> CatResult<CompiledCategory> {
        let patterns = Self::compile_pattern_list(&rule.name, &rule.patterns, stats)?;

        let mut seen = HashSet::new();
        let mut subcategories = Vec::with_capacity(rule.subcategories.len());
        for sub in &rule.subcategories {
            if sub.name.trim().is_empty() {
                return Err(CategorizerError::EmptyRuleField(format!(
                    "subcategory name in '{}'",
                    rule.name
                )));
            }
            if !seen.insert(sub.name.as_str()) {
                return Err(CategorizerError::DuplicateSubcategory {
                    category: rule.name.clone(),
                    subcategory: sub.name.clone(),
                });
            }
            subcategories.push(Self::compile_subcategory(&rule.name, sub, stats)?);
        }

        stats.category_count += 1;
        Ok(CompiledCategory {
            name: rule.name.clone(),
            patterns,
            subcategories,
            scored: rule.scored,
        })
    }

    /// 编译单个子分类（权重必须为正）
    fn compile_subcategory(
        category: &str,
        rule: &SubcategoryRule,
        stats: &mut CompileStats,
    ) -> CatResult<CompiledSubcategory> {
        let weight = u32::try_from(rule.weight)
            .ok()
            .filter(|w| *w > 0)
            .ok_or_else(|| CategorizerError::InvalidWeight {
                category: category.to_string(),
                subcategory: rule.name.clone(),
                weight: rule.weight,
            })?;

        let owner = format!("{}/{}", category, rule.name);
        let patterns = Self::compile_pattern_list(&owner, &rule.patterns, stats)?;

        stats.subcategory_count += 1;
        Ok(CompiledSubcategory {
            name: rule.name.clone(),
            patterns,
            weight,
        })
    }

    /// 编译正则列表
    fn compile_pattern_list(
        owner: &str,
        raw_patterns: &[String],
        stats: &mut CompileStats,
    ) -> CatResult<Vec<CompiledPattern>> {
        raw_patterns
            .iter()
            .map(|raw| Self::compile_single_pattern(owner, raw, stats))
            .collect()
    }

    /// 编译单个正则模式
    /// regex 不支持环视，含环视的模式交给 fancy_regex 编译
    fn compile_single_pattern(owner: &str, raw_pattern: &str, stats: &mut CompileStats) -> CatResult<CompiledPattern> {
        static LOOK_AROUND_REGEX: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\(\?<?[=!]").unwrap()
        });

        // 空正则会在每个位置命中
        if raw_pattern.is_empty() {
            return Err(CategorizerError::EmptyRuleField(format!("pattern in '{}'", owner)));
        }

        let compile_error = |source: PatternErrorKind| CategorizerError::PatternCompileError {
            owner: owner.to_string(),
            pattern: raw_pattern.to_string(),
            source,
        };

        let matcher = if LOOK_AROUND_REGEX.is_match(raw_pattern) {
            stats.look_around_count += 1;
            let regex = fancy_regex::Regex::new(raw_pattern).map_err(|e| compile_error(e.into()))?;
            Matcher::LookAround(regex)
        } else {
            stats.regex_count += 1;
            let regex = Regex::new(raw_pattern).map_err(|e| compile_error(e.into()))?;
            Matcher::Regex(regex)
        };

        Ok(CompiledPattern { matcher })
    }

    /// 编译标题关键词（统一转小写，目标分类必须存在）
    fn compile_keyword(keyword: &TitleKeyword, categories: &HashSet<&str>) -> CatResult<CompiledKeyword> {
        if keyword.keyword.trim().is_empty() {
            return Err(CategorizerError::EmptyRuleField("title keyword".to_string()));
        }
        if !categories.contains(keyword.category.as_str()) {
            return Err(CategorizerError::UnknownKeywordCategory {
                keyword: keyword.keyword.clone(),
                category: keyword.category.clone(),
            });
        }

        Ok(CompiledKeyword {
            keyword: keyword.keyword.to_lowercase(),
            category: keyword.category.clone(),
            unless: keyword
                .unless
                .as_ref()
                .map(|u| u.to_lowercase())
                .filter(|u| !u.is_empty()),
        })
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    category_count: usize,
    subcategory_count: usize,
    regex_count: usize,
    look_around_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleLoader;

    fn table(json: &str) -> RuleTable {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_compile_embedded_table() {
        let compiled = RuleCompiler::compile(&RuleLoader::embedded().unwrap()).unwrap();
        assert_eq!(compiled.categories.len(), 11);
        assert_eq!(compiled.scored_categories().count(), 9);
        assert_eq!(compiled.keywords.len(), 9);

        let rings = &compiled.categories[0];
        assert!(matches!(rings.patterns[0].matcher, Matcher::LookAround(_)));
        assert!(matches!(rings.patterns[2].matcher, Matcher::Regex(_)));
        assert_eq!(rings.subcategories[0].weight, 5);
    }

    #[test]
    fn test_rejects_malformed_pattern() {
        let t = table(r#"{ "categories": [ { "name": "Sets", "patterns": ["set("] } ] }"#);
        let err = RuleCompiler::compile(&t).unwrap_err();
        assert!(matches!(err, CategorizerError::PatternCompileError { .. }));
        assert!(err.is_configuration_error());

        let t = table(r#"{ "categories": [ { "name": "Sets", "patterns": ["set(?!x"] } ] }"#);
        let err = RuleCompiler::compile(&t).unwrap_err();
        assert!(matches!(
            err,
            CategorizerError::PatternCompileError { source: PatternErrorKind::Fancy(_), .. }
        ));
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        for weight in [0, -3] {
            let json = format!(
                r#"{{ "categories": [ {{ "name": "Rings", "patterns": ["ring"],
                    "subcategories": [ {{ "name": "Promise", "patterns": ["promise"], "weight": {} }} ] }} ] }}"#,
                weight
            );
            let err = RuleCompiler::compile(&table(&json)).unwrap_err();
            assert!(matches!(err, CategorizerError::InvalidWeight { weight: w, .. } if w == weight));
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let t = table(r#"{ "categories": [
            { "name": "Sets", "patterns": ["set"] },
            { "name": "Sets", "patterns": ["suite"] } ] }"#);
        assert!(matches!(RuleCompiler::compile(&t).unwrap_err(), CategorizerError::DuplicateCategory(n) if n == "Sets"));

        let t = table(r#"{ "categories": [ { "name": "Rings", "patterns": ["ring"], "subcategories": [
            { "name": "Promise", "patterns": ["promise"], "weight": 4 },
            { "name": "Promise", "patterns": ["couples"], "weight": 4 } ] } ] }"#);
        assert!(matches!(RuleCompiler::compile(&t).unwrap_err(), CategorizerError::DuplicateSubcategory { .. }));
    }

    #[test]
    fn test_rejects_bad_keywords_and_empty_fields() {
        let t = table(r#"{ "title_keywords": [ { "keyword": "ring", "category": "Rings" } ],
            "categories": [ { "name": "Sets", "patterns": ["set"] } ] }"#);
        assert!(matches!(
            RuleCompiler::compile(&t).unwrap_err(),
            CategorizerError::UnknownKeywordCategory { .. }
        ));

        let t = table(r#"{ "categories": [ { "name": "Sets", "patterns": [""] } ] }"#);
        assert!(matches!(RuleCompiler::compile(&t).unwrap_err(), CategorizerError::EmptyRuleField(_)));

        let t = table(r#"{ "categories": [ { "name": " ", "patterns": ["set"] } ] }"#);
        assert!(matches!(RuleCompiler::compile(&t).unwrap_err(), CategorizerError::EmptyRuleField(_)));
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let t = table(r#"{ "title_keywords": [ { "keyword": "Ring", "category": "Rings", "unless": "EarRing" } ],
            "categories": [ { "name": "Rings", "patterns": ["ring"] } ] }"#);
        let compiled = RuleCompiler::compile(&t).unwrap();
        assert_eq!(compiled.keywords[0].keyword, "ring");
        assert_eq!(compiled.keywords[0].unless.as_deref(), Some("earring"));
    }
}
