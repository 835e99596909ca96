//! 批处理模块：CSV读写与整表分类
pub mod table;
pub mod driver;

pub use self::table::{Table, read_table, write_table};
pub use self::driver::{BatchReport, BatchSummary, classify_table, process_file};
