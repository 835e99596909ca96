//! 规则文件格式
//! 处理规则表的 JSON / MessagePack 序列化和反序列化

use std::path::Path;

use rmp_serde::{Serializer, from_slice};
use serde::Serialize;
use tracing::debug;

use super::model::RuleTable;
use crate::error::{CatResult, CategorizerError};

/// 规则文件格式（由扩展名决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Json,
    MsgPack,
}

impl RuleFormat {
    /// 根据文件扩展名推断格式
    pub fn from_path(path: &Path) -> CatResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(RuleFormat::Json),
            Some("mp") | Some("msgpack") => Ok(RuleFormat::MsgPack),
            _ => Err(CategorizerError::InvalidInput(format!(
                "不支持的规则文件扩展名：{}（仅支持 .json / .mp / .msgpack）",
                path.display()
            ))),
        }
    }

    /// 反序列化规则表
    pub fn decode(self, data: &[u8]) -> CatResult<RuleTable> {
        let table: RuleTable = match self {
            RuleFormat::Json => serde_json::from_slice(data)
                .map_err(|e| CategorizerError::RuleParseError(format!("JSON规则表格式错误：{}", e)))?,
            RuleFormat::MsgPack => from_slice(data)
                .map_err(|e| CategorizerError::MsgPackError(format!("解码失败：{}", e)))?,
        };

        debug!(
            "规则表反序列化成功，格式：{:?}，主分类数：{}，关键词数：{}",
            self,
            table.categories.len(),
            table.title_keywords.len()
        );
        Ok(table)
    }

    /// 序列化规则表
    pub fn encode(self, table: &RuleTable) -> CatResult<Vec<u8>> {
        let data = match self {
            RuleFormat::Json => serde_json::to_vec_pretty(table)?,
            RuleFormat::MsgPack => {
                let mut buf = Vec::new();
                // 以map形式写出，保证字段缺省值在反序列化时可用
                table
                    .serialize(&mut Serializer::new(&mut buf).with_struct_map())
                    .map_err(|e| CategorizerError::MsgPackError(format!("编码失败：{}", e)))?;
                buf
            }
        };

        debug!("规则表序列化成功，格式：{:?}，数据大小：{} 字节", self, data.len());
        Ok(data)
    }
}
