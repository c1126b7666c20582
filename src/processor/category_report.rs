use std::collections::HashSet;
use tracing::info;

use super::path_extractor::get;
use super::record_projector::VINTAGE_ID_PATH;
use crate::models::Partition;

/// Wine styles requested from the acquisition side, one partition family each.
pub const STYLES: [&str; 6] = ["Red", "White", "Rose", "Sparkling", "Dessert", "Fortified"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub distinct_vintages: usize,
    pub raw_rows: usize,
}

/// Diagnostic counts per category label; independent of the flat table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    pub categories: Vec<CategoryCount>,
}

fn file_name(partition: &Partition) -> &str {
    partition.name.rsplit('/').next().unwrap_or(&partition.name)
}

fn count<'p>(label: &str, partitions: impl Iterator<Item = &'p Partition>) -> CategoryCount {
    let mut ids = HashSet::new();
    let mut raw_rows = 0;
    for partition in partitions {
        raw_rows += partition.records.len();
        ids.extend(
            partition
                .records
                .iter()
                .filter_map(|record| get(record, VINTAGE_ID_PATH))
                .map(|id| id.to_string()),
        );
    }
    CategoryCount {
        label: label.to_string(),
        distinct_vintages: ids.len(),
        raw_rows,
    }
}

impl CategoryReport {
    /// One entry per known style, then any other labels in first-seen order.
    ///
    /// A style counts every partition whose file name contains it, so one file
    /// can feed several styles. Files matching no style are grouped by label.
    pub fn build(partitions: &[Partition], styles: &[&str]) -> Self {
        let mut categories: Vec<CategoryCount> = styles
            .iter()
            .map(|style| count(style, partitions.iter().filter(|p| file_name(p).contains(style))))
            .collect();

        let unmatched: Vec<&Partition> = partitions
            .iter()
            .filter(|p| !styles.iter().any(|style| file_name(p).contains(style)))
            .collect();
        let mut extra_labels: Vec<&str> = Vec::new();
        for partition in &unmatched {
            if !extra_labels.contains(&partition.label.as_str()) {
                extra_labels.push(&partition.label);
            }
        }
        for label in extra_labels {
            categories.push(count(label, unmatched.iter().copied().filter(|p| p.label == label)));
        }

        CategoryReport { categories }
    }

    /// Sum of per-category distinct counts; a vintage listed under two labels counts twice.
    pub fn total_vintages(&self) -> usize {
        self.categories.iter().map(|c| c.distinct_vintages).sum()
    }

    pub fn total_rows(&self) -> usize {
        self.categories.iter().map(|c| c.raw_rows).sum()
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .categories
            .iter()
            .map(|c| format!("{}: {} vintages ({} rows)", c.label, c.distinct_vintages, c.raw_rows))
            .collect();
        lines.push(format!("Total vintages: {}", self.total_vintages()));
        lines.push(format!("Total rows: {}", self.total_rows()));
        lines
    }

    pub fn log(&self) {
        for line in self.lines() {
            info!("{}", line);
        }
    }
}
