//! 规则模块：负责规则的加载、序列化、数据模型定义
pub mod model;
pub mod format;
pub mod loader;

// 导出核心接口
pub use self::model::{MainCategoryRule, RuleTable, SubcategoryRule, TitleKeyword};
pub use self::format::RuleFormat;
pub use self::loader::RuleLoader;
