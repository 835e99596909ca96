//! 批处理驱动：整表分类并追加 Main_Category / Subcategory 列
//! 记录之间无共享状态，启用 rayon 时按行并行分类，输出顺序与输入一致

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::table::{Table, read_table, write_table};
use crate::classifier::{ClassificationResult, Classifier};
use crate::config::{CategorizerConfig, ColumnNames};
use crate::error::{CatResult, CategorizerError};
use crate::utils::Distribution;

/// 四个输入列的下标（缺失列为 None）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InputColumns {
    url: Option<usize>,
    title: Option<usize>,
    breadcrumb2: Option<usize>,
    breadcrumb3: Option<usize>,
}

impl InputColumns {
    fn locate(table: &Table, names: &ColumnNames) -> Self {
        let locate_one = |name: &str| {
            let idx = table.column_index(name);
            if idx.is_none() {
                warn!("输入表缺少列 {:?}，按空值处理", name);
            }
            idx
        };

        Self {
            url: locate_one(&names.url),
            title: locate_one(&names.title),
            breadcrumb2: locate_one(&names.breadcrumb2),
            breadcrumb3: locate_one(&names.breadcrumb3),
        }
    }

    fn classify_row(&self, classifier: &Classifier, row: &[String]) -> ClassificationResult {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);
        classifier.classify(
            cell(self.url),
            cell(self.title),
            cell(self.breadcrumb2),
            cell(self.breadcrumb3),
        )
    }
}

#[cfg(feature = "rayon")]
fn classify_rows(
    classifier: &Classifier,
    rows: &[Vec<String>],
    columns: InputColumns,
    parallel: bool,
) -> Vec<ClassificationResult> {
    if parallel {
        rows.par_iter()
            .map(|row| columns.classify_row(classifier, row))
            .collect()
    } else {
        rows.iter()
            .map(|row| columns.classify_row(classifier, row))
            .collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn classify_rows(
    classifier: &Classifier,
    rows: &[Vec<String>],
    columns: InputColumns,
    _parallel: bool,
) -> Vec<ClassificationResult> {
    rows.iter()
        .map(|row| columns.classify_row(classifier, row))
        .collect()
}

/// 批处理摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub uncategorized: usize,
    pub elapsed: Duration,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classified {} rows ({} uncategorized) in {:?}",
            self.rows, self.uncategorized, self.elapsed
        )
    }
}

/// 批处理结果：摘要 + 分布统计
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub distribution: Distribution,
}

/// 分类整张表，写入（或覆盖）两列输出
pub fn classify_table(
    classifier: &Classifier,
    table: &mut Table,
    names: &ColumnNames,
    parallel: bool,
) -> BatchReport {
    let start = Instant::now();
    let columns = InputColumns::locate(table, names);
    let results = classify_rows(classifier, &table.rows, columns, parallel);

    let main_idx = table.ensure_column(&names.main_category);
    let sub_idx = table.ensure_column(&names.subcategory);
    for (row, result) in table.rows.iter_mut().zip(&results) {
        row[main_idx] = result.main_category.clone();
        row[sub_idx] = result.subcategory.clone();
    }

    let summary = BatchSummary {
        rows: results.len(),
        uncategorized: results.iter().filter(|r| r.is_uncategorized()).count(),
        elapsed: start.elapsed(),
    };
    info!("批处理完成：{}", summary);

    BatchReport {
        summary,
        distribution: Distribution::from_results(&results),
    }
}

/// 端到端处理：读取输入CSV，分类，写出输出CSV
pub fn process_file(
    classifier: &Classifier,
    input: &Path,
    output: &Path,
    config: &CategorizerConfig,
) -> CatResult<BatchReport> {
    let file = File::open(input).map_err(|e| {
        CategorizerError::InvalidInput(format!("无法打开输入文件 {}：{}", input.display(), e))
    })?;
    let mut table = read_table(file)?;
    info!("读取输入：{}，共{}行", input.display(), table.rows.len());

    let report = classify_table(classifier, &mut table, &config.columns, config.parallel);

    let mut writer = BufWriter::new(File::create(output)?);
    write_table(&mut writer, &table)?;
    writer.flush()?;
    info!("结果已写入：{}", output.display());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::with_embedded_rules().unwrap()
    }

    #[test]
    fn test_classify_table_appends_columns() {
        let data = "Full URL,Title,Breadcrumb Level 2,Breadcrumb Level 3\n\
                    https://x/1,Blue Topaz Drop Earrings,,\n\
                    https://x/2,,Previously Owned,Watches\n\
                    https://x/3,#NAME?,nan,\n";
        let mut table = read_table(data.as_bytes()).unwrap();
        let report = classify_table(&classifier(), &mut table, &ColumnNames::default(), false);

        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.headers[4], "Main_Category");
        assert_eq!(table.headers[5], "Subcategory");
        assert_eq!(&table.rows[0][4..], &["Earrings".to_string(), "Drop".to_string()]);
        assert_eq!(&table.rows[1][4..], &["Previously Owned Watches".to_string(), "General".to_string()]);
        assert_eq!(&table.rows[2][4..], &["Uncategorized".to_string(), "Uncategorized".to_string()]);

        assert_eq!(report.summary.rows, 3);
        assert_eq!(report.summary.uncategorized, 1);
        assert_eq!(report.distribution.main_categories.get("Earrings"), 1);
    }

    #[test]
    fn test_missing_columns_are_absent_values() {
        let mut table = read_table("Title\nGold Charm\n".as_bytes()).unwrap();
        classify_table(&classifier(), &mut table, &ColumnNames::default(), false);
        assert_eq!(table.headers, vec!["Title", "Main_Category", "Subcategory"]);
        assert_eq!(table.rows[0], vec!["Gold Charm", "Charms", "Fashion"]);
    }

    #[test]
    fn test_existing_output_columns_are_overwritten() {
        let data = "Title,Main_Category,Subcategory\nGold Bangle,stale,stale\n";
        let mut table = read_table(data.as_bytes()).unwrap();
        classify_table(&classifier(), &mut table, &ColumnNames::default(), false);
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows[0], vec!["Gold Bangle", "Bracelets", "Fashion"]);
    }

    #[test]
    fn test_long_rows_keep_extra_cells() {
        let mut table = read_table("Title\nGold Ring,extra-note\nPendant\n".as_bytes()).unwrap();
        classify_table(&classifier(), &mut table, &ColumnNames::default(), false);
        assert_eq!(table.headers, vec!["Title", "", "Main_Category", "Subcategory"]);
        assert_eq!(table.rows[0], vec!["Gold Ring", "extra-note", "Rings", "Fashion"]);
        assert_eq!(table.rows[1], vec!["Pendant", "", "Necklaces", "Fashion"]);

        let mut out = Vec::new();
        write_table(&mut out, &table).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Title,,Main_Category,Subcategory\nGold Ring,extra-note,Rings,Fashion\nPendant,,Necklaces,Fashion\n"
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut data = String::from("Title,Breadcrumb Level 2\n");
        let titles = [
            "Gold Hoop Earrings",
            "Tennis Bracelet",
            "Personalized Name Plate",
            "Mens Chronograph",
            "Pearl Set",
            "Latitude Longitude Bar",
        ];
        for i in 0..120 {
            data.push_str(&format!("{} {},Jewelry\n", titles[i % titles.len()], i));
        }

        let mut sequential = read_table(data.as_bytes()).unwrap();
        let mut parallel = sequential.clone();
        let c = classifier();
        classify_table(&c, &mut sequential, &ColumnNames::default(), false);
        classify_table(&c, &mut parallel, &ColumnNames::default(), true);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_process_file_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.csv");
        let output = dir.path().join("categorized_products.csv");
        std::fs::write(&input, "sep=,\nTitle,Breadcrumb Level 2\nSterling Silver Rope Chain Necklace,\n").unwrap();

        let report = process_file(&classifier(), &input, &output, &CategorizerConfig::default()).unwrap();
        assert_eq!(report.summary.rows, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "sep=,\nTitle,Breadcrumb Level 2,Main_Category,Subcategory\n\
             Sterling Silver Rope Chain Necklace,,Necklaces,Chains\n"
        );
    }

    #[test]
    fn test_process_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_file(
            &classifier(),
            &dir.path().join("absent.csv"),
            &dir.path().join("out.csv"),
            &CategorizerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CategorizerError::InvalidInput(_)));
    }
}
