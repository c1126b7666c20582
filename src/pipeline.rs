//! End-to-end run: partitions in, flat table and previews out.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{PipelineConfig, RunConfig};
use crate::models::{FlatTable, Partition};
use crate::processor::{
    CategoryReport, CollectStats, Deduplicator, STYLES, TableWriter, TasteClassifier,
    TextNormalizer, VarietalSummary,
};
use crate::storage::{MinioStorage, PartitionSource, StorageManager};

/// Everything derived from one set of partitions.
#[derive(Debug, Clone)]
pub struct ProcessedCorpus {
    pub table: FlatTable,
    pub summary: VarietalSummary,
    pub report: CategoryReport,
    pub stats: CollectStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub table: PathBuf,
    pub sample: PathBuf,
    pub parquet: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

impl WrittenOutputs {
    pub fn paths(&self) -> Vec<&PathBuf> {
        let mut paths = vec![&self.table, &self.sample];
        paths.extend(self.parquet.iter());
        paths.extend(self.summary.iter());
        paths
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    pub stats: CollectStats,
    pub report: CategoryReport,
    pub varietals: usize,
    pub outputs: WrittenOutputs,
    pub uploaded: Vec<String>,
}

/// Dedup, normalize, classify and summarize a batch of partitions.
pub fn process(partitions: &[Partition], run: &RunConfig) -> Result<ProcessedCorpus> {
    let report = CategoryReport::build(partitions, &STYLES);

    let outcome = Deduplicator::new(run.on_missing_id)
        .collect(partitions)
        .context("Failed to assemble the flat table")?;
    let mut table = outcome.table;

    if run.normalize_text {
        TextNormalizer::new(run.normalize_multi_valued).normalize_table(&mut table);
        info!("Applied text normalization to {} rows", table.len());
    }

    let table = table.with_taste_categories(TasteClassifier::classify_row);
    let summary = VarietalSummary::build(&table);
    info!("Derived taste categories; {} varietals summarized", summary.len());

    Ok(ProcessedCorpus {
        table,
        summary,
        report,
        stats: outcome.stats,
    })
}

pub fn write_outputs(corpus: &ProcessedCorpus, config: &PipelineConfig) -> Result<WrittenOutputs> {
    std::fs::create_dir_all(&config.output.dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output.dir.display())
    })?;

    let mut df = TableWriter::to_dataframe(&corpus.table)?;
    let table_path = config.table_path();
    TableWriter::write_csv(&mut df, &table_path)?;

    let sample = TableWriter::sample(&corpus.table, config.output.sample_size, config.output.sample_seed);
    let mut sample_df = TableWriter::to_dataframe(&sample)?;
    let sample_path = config.sample_path();
    TableWriter::write_csv(&mut sample_df, &sample_path)?;

    let parquet = if config.output.parquet {
        let path = config.parquet_path();
        TableWriter::write_parquet(&mut df, &path)?;
        Some(path)
    } else {
        None
    };

    let summary = match config.summary_path() {
        Some(path) => {
            let mut summary_df = TableWriter::summary_dataframe(&corpus.summary)?;
            TableWriter::write_csv(&mut summary_df, &path)?;
            Some(path)
        }
        None => None,
    };

    Ok(WrittenOutputs {
        table: table_path,
        sample: sample_path,
        parquet,
        summary,
    })
}

pub async fn upload_outputs(
    storage: &MinioStorage,
    prefix: &str,
    run_id: &str,
    outputs: &WrittenOutputs,
) -> Result<Vec<String>> {
    let at = Utc::now();
    let mut keys = Vec::new();
    for path in outputs.paths() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read output for upload: {}", path.display()))?;
        let key = StorageManager::output_key(prefix, run_id, &file_name, at);
        keys.push(storage.store_object(&key, &data).await?);
    }
    Ok(keys)
}

/// Loads every partition from `source`, processes them and writes the outputs.
pub async fn run(
    config: &PipelineConfig,
    source: &dyn PartitionSource,
    upload: Option<(&MinioStorage, &str)>,
) -> Result<RunSummary> {
    let run_id = StorageManager::new_run_id();
    info!("Starting wine pipeline run {}", run_id);

    let partitions = source.load_all().await?;
    if partitions.is_empty() {
        warn!("No partitions found; writing an empty table");
    }

    let corpus = process(&partitions, &config.pipeline)?;
    corpus.report.log();

    let outputs = write_outputs(&corpus, config)?;

    let uploaded = match upload {
        Some((storage, prefix)) => upload_outputs(storage, prefix, &run_id, &outputs).await?,
        None => Vec::new(),
    };

    info!(
        "Run {} complete: {} rows from {} raw records ({} duplicates skipped)",
        run_id, corpus.stats.rows, corpus.stats.raw_records, corpus.stats.duplicates_skipped
    );

    Ok(RunSummary {
        run_id,
        stats: corpus.stats,
        varietals: corpus.summary.len(),
        report: corpus.report,
        outputs,
        uploaded,
    })
}
