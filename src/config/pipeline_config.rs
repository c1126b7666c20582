use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::processor::MissingIdPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub pipeline: RunConfig,
    pub storage: StorageConfig,
}

/// Where partition files live and how they are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub table_file: String,
    pub sample_file: String,
    pub sample_size: usize,
    pub sample_seed: Option<u64>,
    pub parquet: bool,
    pub summary_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub on_missing_id: MissingIdPolicy,
    pub normalize_text: bool,
    pub normalize_multi_valued: bool,
}

/// Optional MinIO/S3 backing for partitions and outputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub minio_config: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/scrapped_data"),
            file_prefix: "scrapped_data_".to_string(),
            extension: "json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            table_file: "wines.csv".to_string(),
            sample_file: "wines_head.csv".to_string(),
            sample_size: 20,
            sample_seed: None,
            parquet: false,
            summary_file: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            on_missing_id: MissingIdPolicy::Skip,
            normalize_text: true,
            normalize_multi_valued: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse pipeline config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.extension.is_empty() {
            return Err(anyhow!("Input file extension cannot be empty"));
        }

        if self.output.table_file.is_empty() || self.output.sample_file.is_empty() {
            return Err(anyhow!("Output file names cannot be empty"));
        }

        if self.output.table_file == self.output.sample_file {
            return Err(anyhow!(
                "Table and sample outputs must differ: {}",
                self.output.table_file
            ));
        }

        Ok(())
    }

    pub fn table_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.table_file)
    }

    pub fn sample_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.sample_file)
    }

    pub fn parquet_path(&self) -> PathBuf {
        self.table_path().with_extension("parquet")
    }

    pub fn summary_path(&self) -> Option<PathBuf> {
        self.output.summary_file.as_ref().map(|f| self.output.dir.join(f))
    }
}
