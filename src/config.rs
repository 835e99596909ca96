//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 规则来源
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RuleOrigin {
    #[default]
    Embedded,           // 内置规则（编译期 include_str!）
    LocalFile(PathBuf), // 本地规则文件（.json / .mp）
}

/// 输入输出列名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub url: String,
    pub title: String,
    pub breadcrumb2: String,
    pub breadcrumb3: String,
    pub main_category: String,
    pub subcategory: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            url: "Full URL".to_string(),
            title: "Title".to_string(),
            breadcrumb2: "Breadcrumb Level 2".to_string(),
            breadcrumb3: "Breadcrumb Level 3".to_string(),
            main_category: "Main_Category".to_string(),
            subcategory: "Subcategory".to_string(),
        }
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct CategorizerConfig {
    // 规则来源
    pub rule_origin: RuleOrigin,
    // CSV列名
    pub columns: ColumnNames,
    // 是否并行分类（需启用rayon特性）
    pub parallel: bool,
    // 是否输出分布统计
    pub print_report: bool,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            rule_origin: RuleOrigin::Embedded,
            columns: ColumnNames::default(),
            parallel: true,
            print_report: true,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> CategorizerConfig {
        CategorizerConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: CategorizerConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CategorizerConfig::default(),
        }
    }

    pub fn rule_origin(mut self, origin: RuleOrigin) -> Self {
        self.config.rule_origin = origin;
        self
    }

    /// 本地规则文件（None 时回退到内置规则）
    pub fn rules_file(mut self, path: Option<PathBuf>) -> Self {
        self.config.rule_origin = match path {
            Some(p) => RuleOrigin::LocalFile(p),
            None => RuleOrigin::Embedded,
        };
        self
    }

    pub fn columns(mut self, columns: ColumnNames) -> Self {
        self.config.columns = columns;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn print_report(mut self, print_report: bool) -> Self {
        self.config.print_report = print_report;
        self
    }

    pub fn build(self) -> CategorizerConfig {
        self.config
    }
}
