//! 全局分类器单例管理
use once_cell::sync::OnceCell;

use super::classifier::Classifier;
use super::record::ClassificationResult;
use crate::config::{CategorizerConfig, ConfigManager};
use crate::error::{CatResult, CategorizerError};

/// 全局分类器实例
static GLOBAL_CLASSIFIER: OnceCell<Classifier> = OnceCell::new();

/// 初始化全局分类器（默认配置）
pub fn init_categorizer() -> CatResult<()> {
    init_categorizer_with_config(&ConfigManager::get_default())
}

/// 带自定义配置初始化全局分类器（重复初始化时保留首个实例）
pub fn init_categorizer_with_config(config: &CategorizerConfig) -> CatResult<()> {
    GLOBAL_CLASSIFIER.get_or_try_init(|| Classifier::from_origin(&config.rule_origin))?;
    Ok(())
}

/// 获取全局分类器
pub fn global_classifier() -> CatResult<&'static Classifier> {
    GLOBAL_CLASSIFIER
        .get()
        .ok_or(CategorizerError::ClassifierNotInitialized)
}

/// 使用全局分类器分类单条记录
pub fn classify_product(
    url: Option<&str>,
    title: Option<&str>,
    breadcrumb2: Option<&str>,
    breadcrumb3: Option<&str>,
) -> CatResult<ClassificationResult> {
    let classifier = global_classifier()?;
    Ok(classifier.classify(url, title, breadcrumb2, breadcrumb3))
}
