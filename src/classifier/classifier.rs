//! 分类器核心：规范化输入字段，依次执行各阶段分析器，输出分类结果
//! 分类器构建后只读，可在多线程间共享（Clone 仅复制 Arc）
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::analyzer::{PatternScorer, PreviouslyOwnedAnalyzer, TitleKeywordAnalyzer};
use super::record::{ClassificationResult, NormalizedFields, Phase, ProductRecord};
use crate::compiler::{CompiledRuleTable, RuleCompiler};
use crate::config::RuleOrigin;
use crate::error::CatResult;
use crate::rule::{RuleLoader, RuleTable};

/// 商品分类器
#[derive(Debug, Clone)]
pub struct Classifier {
    compiled_table: Arc<CompiledRuleTable>,
}

impl Classifier {
    /// 使用内存中的规则表创建分类器（规则表非法时返回配置错误）
    pub fn new(table: &RuleTable) -> CatResult<Self> {
        let compiled_table = RuleCompiler::compile(table)?;
        Ok(Self {
            compiled_table: Arc::new(compiled_table),
        })
    }

    /// 按规则来源加载并创建分类器
    pub fn from_origin(origin: &RuleOrigin) -> CatResult<Self> {
        let start = Instant::now();
        let table = RuleLoader::load(origin)?;
        let classifier = Self::new(&table)?;
        info!(
            "分类器初始化完成，规则来源：{:?}，主分类数：{}，耗时{:?}",
            origin,
            classifier.compiled_table.categories.len(),
            start.elapsed()
        );
        Ok(classifier)
    }

    /// 使用内置规则创建分类器
    pub fn with_embedded_rules() -> CatResult<Self> {
        Self::from_origin(&RuleOrigin::Embedded)
    }

    /// 编译后的规则表
    pub fn rule_table(&self) -> &CompiledRuleTable {
        &self.compiled_table
    }

    /// 分类单条记录（四个字段均为原始文本，可缺失）
    pub fn classify(
        &self,
        url: Option<&str>,
        title: Option<&str>,
        breadcrumb2: Option<&str>,
        breadcrumb3: Option<&str>,
    ) -> ClassificationResult {
        self.classify_traced(url, title, breadcrumb2, breadcrumb3).0
    }

    /// 分类 ProductRecord
    pub fn classify_record(&self, record: &ProductRecord) -> ClassificationResult {
        self.classify(
            record.url.as_deref(),
            record.title.as_deref(),
            record.breadcrumb2.as_deref(),
            record.breadcrumb3.as_deref(),
        )
    }

    /// 分类并返回决定结果的阶段
    pub fn classify_traced(
        &self,
        url: Option<&str>,
        title: Option<&str>,
        breadcrumb2: Option<&str>,
        breadcrumb3: Option<&str>,
    ) -> (ClassificationResult, Phase) {
        let fields = NormalizedFields::new(url, title, breadcrumb2, breadcrumb3);

        // 1. 标题关键词
        if let Some(result) = TitleKeywordAnalyzer::analyze(&self.compiled_table, &fields.title) {
            return (result, Phase::TitleKeyword);
        }

        // 2. 二手商品
        let combined = fields.combined();
        if let Some(result) = PreviouslyOwnedAnalyzer::analyze(&combined) {
            return (result, Phase::PreviouslyOwned);
        }

        // 3. 加权打分
        (PatternScorer::analyze(&self.compiled_table, &combined), Phase::PatternScore)
    }
}
