use anyhow::{Context, Result, anyhow};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::path::Path;
use tracing::info;

use super::corpus_summarizer::VarietalSummary;
use crate::models::{FLAT_COLUMNS, FlatRow, FlatTable, TASTE_CATEGORY_COLUMN};

fn text_column(rows: &[FlatRow], name: &str, value: impl Fn(&FlatRow) -> Option<String>) -> Column {
    let values: Vec<Option<String>> = rows.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

fn joined_column(rows: &[FlatRow], name: &str, value: impl Fn(&FlatRow) -> String) -> Column {
    let values: Vec<String> = rows.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

fn float_column(rows: &[FlatRow], name: &str, value: impl Fn(&FlatRow) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = rows.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

/// Converts flat tables to polars frames and writes them out.
pub struct TableWriter;

impl TableWriter {
    pub fn to_dataframe(table: &FlatTable) -> Result<DataFrame> {
        let rows = table.rows();
        let mut columns: Vec<Column> = vec![
            text_column(rows, "wine_id", |r| r.wine_id.clone()),
            text_column(rows, "vintage_id", |r| r.vintage_id.clone()),
            joined_column(rows, "category_label", |r| r.category_label.clone()),
            text_column(rows, "region_id", |r| r.region_id.clone()),
            text_column(rows, "region_name", |r| r.region_name.clone()),
            text_column(rows, "country_name", |r| r.country_name.clone()),
            joined_column(rows, "used_grapes", |r| r.used_grapes.clone()),
            joined_column(rows, "relevant_food", |r| r.relevant_food.clone()),
            joined_column(rows, "top_flavors", |r| r.top_flavors.clone()),
            text_column(rows, "vintage_name", |r| r.vintage_name.clone()),
            text_column(rows, "wine_name", |r| r.wine_name.clone()),
            text_column(rows, "varietal_name", |r| r.varietal_name.clone()),
            text_column(rows, "style_name", |r| r.style_name.clone()),
            Series::new("year".into(), rows.iter().map(|r| r.year).collect::<Vec<Option<i32>>>()).into(),
            float_column(rows, "price", |r| r.price),
            text_column(rows, "currency_code", |r| r.currency_code.clone()),
            float_column(rows, "acidity", |r| r.acidity),
            float_column(rows, "intensity", |r| r.intensity),
            float_column(rows, "sweetness", |r| r.sweetness),
            float_column(rows, "tannin", |r| r.tannin),
            float_column(rows, "fizziness", |r| r.fizziness),
            float_column(rows, "rating_avg", |r| r.rating_avg),
            Series::new(
                "rating_count".into(),
                rows.iter().map(|r| r.rating_count).collect::<Vec<Option<i64>>>(),
            )
            .into(),
            text_column(rows, "product_url", |r| r.product_url.clone()),
            text_column(rows, "style_description", |r| r.style_description.clone()),
        ];
        debug_assert_eq!(columns.len(), FLAT_COLUMNS.len());

        if table.has_taste_categories() {
            columns.push(text_column(rows, TASTE_CATEGORY_COLUMN, |r| {
                r.taste_category.map(|c| c.as_str().to_string())
            }));
        }

        DataFrame::new(columns).map_err(|e| anyhow!("Failed to create DataFrame: {}", e))
    }

    pub fn summary_dataframe(summary: &VarietalSummary) -> Result<DataFrame> {
        let names: Vec<String> = summary.varietals.keys().cloned().collect();
        let flavors: Vec<String> = summary.varietals.values().map(|p| p.top_flavors.clone()).collect();
        let foods: Vec<String> = summary.varietals.values().map(|p| p.top_food.clone()).collect();

        DataFrame::new(vec![
            Series::new("varietal_name".into(), names).into(),
            Series::new("top_flavors".into(), flavors).into(),
            Series::new("top_food".into(), foods).into(),
        ])
        .map_err(|e| anyhow!("Failed to create summary DataFrame: {}", e))
    }

    /// Uniform sample without replacement of `min(size, len)` rows.
    pub fn sample(table: &FlatTable, size: usize, seed: Option<u64>) -> FlatTable {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        table.subset(table.rows().choose_multiple(&mut rng, size))
    }

    pub fn csv_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(df)
            .context("Failed to encode CSV")?;
        Ok(buf)
    }

    pub fn parquet_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ParquetWriter::new(&mut buf)
            .finish(df)
            .context("Failed to encode Parquet")?;
        Ok(buf)
    }

    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        info!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }

    pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create Parquet file: {}", path.display()))?;
        ParquetWriter::new(file)
            .finish(df)
            .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        info!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }
}
