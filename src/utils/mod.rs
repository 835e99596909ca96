//! 工具模块：文本规范化、分布统计
pub mod normalizer;
pub mod distribution;

pub use self::normalizer::{TextNormalizer, normalize};
pub use self::distribution::Distribution;
