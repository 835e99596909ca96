//! 规则加载管理器
//! 负责从内置数据或本地文件加载规则表

use std::path::Path;
use tracing::{debug, info};

use super::format::RuleFormat;
use super::model::RuleTable;
use crate::config::RuleOrigin;
use crate::error::{CatResult, CategorizerError};

/// 内置默认规则表（珠宝类目）
static EMBEDDED_RULES_JSON: &str = include_str!("../../data/jewelry_rules.json");

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 按规则来源加载规则表
    pub fn load(origin: &RuleOrigin) -> CatResult<RuleTable> {
        match origin {
            RuleOrigin::Embedded => {
                let table = Self::embedded()?;
                debug!("从内置数据加载规则表成功");
                Ok(table)
            }
            RuleOrigin::LocalFile(path) => Self::load_file(path),
        }
    }

    /// 内置规则表
    pub fn embedded() -> CatResult<RuleTable> {
        RuleFormat::Json.decode(EMBEDDED_RULES_JSON.as_bytes())
    }

    /// 从本地文件加载规则表（格式由扩展名决定）
    pub fn load_file(path: &Path) -> CatResult<RuleTable> {
        let format = RuleFormat::from_path(path)?;
        let data = std::fs::read(path).map_err(|e| {
            CategorizerError::RuleLoadError(format!("无法读取 {}：{}", path.display(), e))
        })?;
        let table = format.decode(&data)?;

        info!(
            "从本地文件加载规则表：{}，版本：{}",
            path.display(),
            table.version.as_deref().unwrap_or("unversioned")
        );
        Ok(table)
    }

    /// 将规则表写入本地文件（格式由扩展名决定）
    pub fn save(table: &RuleTable, path: &Path) -> CatResult<()> {
        let format = RuleFormat::from_path(path)?;
        let data = format.encode(table)?;
        std::fs::write(path, data)?;
        debug!("规则表已写入：{}", path.display());
        Ok(())
    }
}
