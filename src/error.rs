//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use fancy_regex::Error as FancyRegexError;
use serde_json::Error as SerdeJsonError;
use csv::Error as CsvError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum CategorizerError {
    // 规则相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则解析失败：{0}")]
    RuleParseError(String),

    // 规则校验错误（配置错误，构建分类器时即失败）
    #[error("子分类权重无效：{category}/{subcategory} 的权重为{weight}，必须为正数")]
    InvalidWeight {
        category: String,
        subcategory: String,
        weight: i64,
    },
    #[error("主分类重名：{0}")]
    DuplicateCategory(String),
    #[error("子分类重名：{category}/{subcategory}")]
    DuplicateSubcategory {
        category: String,
        subcategory: String,
    },
    #[error("标题关键词 {keyword} 指向未知分类：{category}")]
    UnknownKeywordCategory {
        keyword: String,
        category: String,
    },
    #[error("规则表存在空字段：{0}")]
    EmptyRuleField(String),

    // 编译相关错误
    #[error("正则编译失败：{owner} 中的 {pattern}：{source}")]
    PatternCompileError {
        owner: String,
        pattern: String,
        #[source]
        source: PatternErrorKind,
    },

    // 分类相关错误
    #[error("分类器未初始化")]
    ClassifierNotInitialized,

    // 批处理相关错误
    #[error("CSV处理失败：{0}")]
    CsvError(#[from] CsvError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

/// 正则编译错误来源（标准正则 / 支持环视的正则）
#[derive(Error, Debug)]
pub enum PatternErrorKind {
    #[error(transparent)]
    Regex(#[from] RegexError),
    #[error(transparent)]
    Fancy(#[from] FancyRegexError),
}

impl CategorizerError {
    /// 是否属于规则配置错误（启动期致命错误）
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CategorizerError::RuleParseError(_)
                | CategorizerError::InvalidWeight { .. }
                | CategorizerError::DuplicateCategory(_)
                | CategorizerError::DuplicateSubcategory { .. }
                | CategorizerError::UnknownKeywordCategory { .. }
                | CategorizerError::EmptyRuleField(_)
                | CategorizerError::PatternCompileError { .. }
        )
    }
}

// 全局Result类型
pub type CatResult<T> = Result<T, CategorizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CategorizerError::InvalidWeight {
            category: "Rings".to_string(),
            subcategory: "Promise".to_string(),
            weight: 0,
        };
        assert_eq!(err.to_string(), "子分类权重无效：Rings/Promise 的权重为0，必须为正数");
        assert!(err.is_configuration_error());

        let err = CategorizerError::ClassifierNotInitialized;
        assert_eq!(err.to_string(), "分类器未初始化");
        assert!(!err.is_configuration_error());
    }
}
