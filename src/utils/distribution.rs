//! 分类结果分布统计
//! 统计各输出列取值的出现次数，按次数降序、取值升序排列

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;

use crate::classifier::ClassificationResult;

/// 单列取值计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut entries: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn get(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.entries.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);
        for (value, count) in &self.entries {
            writeln!(f, "{:<width$}    {}", value, count, width = width)?;
        }
        Ok(())
    }
}

/// 主分类 / 子分类分布
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub main_categories: ValueCounts,
    pub subcategories: ValueCounts,
}

impl Distribution {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        Self {
            main_categories: ValueCounts::from_values(results.iter().map(|r| r.main_category.as_str())),
            subcategories: ValueCounts::from_values(results.iter().map(|r| r.subcategory.as_str())),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Category Distribution:")?;
        write!(f, "{}", self.main_categories)?;
        writeln!(f)?;
        writeln!(f, "Subcategory Distribution:")?;
        write!(f, "{}", self.subcategories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sorted_by_frequency_then_name() {
        let counts = ValueCounts::from_values(["Rings", "Sets", "Rings", "Charms", "Sets", "Rings"]);
        assert_eq!(
            counts.entries(),
            &[
                ("Rings".to_string(), 3),
                ("Sets".to_string(), 2),
                ("Charms".to_string(), 1)
            ]
        );
        assert_eq!(counts.get("Sets"), 2);
        assert_eq!(counts.get("Watches"), 0);
        assert_eq!(counts.total(), 6);

        let tied = ValueCounts::from_values(["b", "a"]);
        assert_eq!(tied.entries()[0].0, "a");
    }

    #[test]
    fn test_distribution_display() {
        let results = vec![
            ClassificationResult::new("Rings", "Fashion"),
            ClassificationResult::new("Necklaces", "Chains"),
            ClassificationResult::new("Rings", "Engagement"),
        ];
        let dist = Distribution::from_results(&results);
        assert_eq!(dist.main_categories.get("Rings"), 2);
        assert_eq!(dist.subcategories.total(), 3);

        let text = dist.to_string();
        assert!(text.starts_with("Category Distribution:\nRings        2\n"));
        assert!(text.contains("\nSubcategory Distribution:\n"));
        assert!(text.contains("Engagement    1\n"));
    }
}
