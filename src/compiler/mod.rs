//! 编译模块：校验规则表并编译为可执行的正则模式
pub mod pattern;
pub mod compiler;

pub use self::pattern::{
    CompiledCategory, CompiledKeyword, CompiledPattern, CompiledRuleTable, CompiledSubcategory, Matcher,
};
pub use self::compiler::RuleCompiler;
