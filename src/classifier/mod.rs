//! 分类模块：商品分类核心逻辑
pub mod record;
pub mod analyzer;
pub mod classifier;
pub mod global;

// 导出核心接口
pub use self::record::{
    ClassificationResult, NormalizedFields, Phase, ProductRecord, DEFAULT_SUBCATEGORY, GENERAL_SUBCATEGORY,
    PREVIOUSLY_OWNED_JEWELRY, PREVIOUSLY_OWNED_WATCHES, UNCATEGORIZED,
};
pub use self::analyzer::{PatternScorer, PreviouslyOwnedAnalyzer, TitleKeywordAnalyzer};
pub use self::classifier::Classifier;
pub use self::global::{classify_product, global_classifier, init_categorizer, init_categorizer_with_config};
