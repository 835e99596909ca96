//! rscategorizer - 基于规则的商品二级分类工具

// 导出全局错误类型
pub use self::error::{CategorizerError, CatResult, PatternErrorKind};

// 导出配置模块
pub use self::config::{CategorizerConfig, ColumnNames, ConfigManager, CustomConfigBuilder, RuleOrigin};

// 导出规则模块核心接口
pub use self::rule::{
    MainCategoryRule, RuleFormat, RuleLoader, RuleTable, SubcategoryRule, TitleKeyword
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledCategory, CompiledRuleTable, CompiledSubcategory, Matcher, RuleCompiler
};

// 导出工具模块核心接口
pub use self::utils::{Distribution, TextNormalizer, normalize};

// 导出分类模块核心接口（含全局单例的简化接口）
pub use self::classifier::{
    ClassificationResult,
    Classifier,
    Phase,
    ProductRecord,
    classify_product,
    init_categorizer,
    init_categorizer_with_config,
};

// 导出批处理模块核心接口
pub use self::batch::{BatchReport, BatchSummary, Table, classify_table, process_file, read_table, write_table};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod utils;
pub mod classifier;
pub mod batch;
