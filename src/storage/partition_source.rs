use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use tracing::{error, info};

use crate::models::{Partition, RawRecord};

/// Enumerates and loads record batches from some backing store.
#[async_trait]
pub trait PartitionSource: Send + Sync {
    /// Partition names in processing order.
    async fn list_partitions(&self) -> Result<Vec<String>>;

    async fn load_partition(&self, name: &str) -> Result<Partition>;

    /// Loads every listed partition; unreadable ones are logged and skipped.
    async fn load_all(&self) -> Result<Vec<Partition>> {
        let names = self.list_partitions().await?;
        info!("Found {} partitions", names.len());

        let mut partitions = Vec::with_capacity(names.len());
        for name in names {
            match self.load_partition(&name).await {
                Ok(partition) => partitions.push(partition),
                Err(e) => error!("Failed to load partition {}: {:#}", name, e),
            }
        }
        Ok(partitions)
    }
}

/// Derives category labels from partition file names such as
/// `scrapped_data_Red_0_15_ratings_average_[3, 4, 5]_3.8.json`.
#[derive(Debug, Clone)]
pub struct PartitionNaming {
    pattern: Regex,
}

impl PartitionNaming {
    pub fn new(file_prefix: &str, extension: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"^{}([^_.]+)(?:_.*)?\.{}$",
            regex::escape(file_prefix),
            regex::escape(extension)
        ))?;
        Ok(PartitionNaming { pattern })
    }

    /// Category label of a partition, judged on the last path component only.
    pub fn label_for(&self, name: &str) -> Option<String> {
        let file_name = name.rsplit('/').next().unwrap_or(name);
        self.pattern
            .captures(file_name)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn matches(&self, name: &str) -> bool {
        self.label_for(name).is_some()
    }
}

/// Parses a partition body, which must be a JSON array of records.
pub fn parse_records(name: &str, content: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse JSON in partition {}", name))?;
    match value {
        Value::Array(records) => Ok(records),
        other => Err(anyhow!(
            "Partition {} must hold a JSON array, found {}",
            name,
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
