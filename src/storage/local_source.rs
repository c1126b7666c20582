use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::partition_source::{PartitionNaming, PartitionSource, parse_records};
use crate::config::InputConfig;
use crate::models::Partition;

/// Partition files in one local directory, processed in file-name order.
pub struct LocalPartitionSource {
    dir: PathBuf,
    naming: PartitionNaming,
}

impl LocalPartitionSource {
    pub fn new(dir: impl Into<PathBuf>, naming: PartitionNaming) -> Self {
        LocalPartitionSource {
            dir: dir.into(),
            naming,
        }
    }

    pub fn from_config(input: &InputConfig) -> Result<Self> {
        let naming = PartitionNaming::new(&input.file_prefix, &input.extension)?;
        Ok(Self::new(&input.dir, naming))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl PartitionSource for LocalPartitionSource {
    async fn list_partitions(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to list partition directory: {}", self.dir.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if self.naming.matches(&name) && entry.file_type().await?.is_file() {
                names.push(name);
            } else {
                debug!("Ignoring non-partition entry: {}", name);
            }
        }

        names.sort();
        info!("Listed {} partition files in {}", names.len(), self.dir.display());
        Ok(names)
    }

    async fn load_partition(&self, name: &str) -> Result<Partition> {
        let label = self
            .naming
            .label_for(name)
            .ok_or_else(|| anyhow!("Cannot derive a category label from {}", name))?;

        let path = self.dir.join(name);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read partition file: {}", path.display()))?;
        let records = parse_records(name, &content)?;

        debug!("Loaded {} records from {} [{}]", records.len(), name, label);
        Ok(Partition::new(name, label, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source(dir: &Path) -> LocalPartitionSource {
        LocalPartitionSource::new(dir, PartitionNaming::new("scrapped_data_", "json").unwrap())
    }

    #[tokio::test]
    async fn test_lists_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scrapped_data_White_0_15.json"), "[]").unwrap();
        fs::write(dir.path().join("scrapped_data_Red_0_15.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("scrapped_data_Rose_dir.json")).unwrap();

        let names = source(dir.path()).list_partitions().await.unwrap();
        assert_eq!(names, vec!["scrapped_data_Red_0_15.json", "scrapped_data_White_0_15.json"]);
    }

    #[tokio::test]
    async fn test_load_partition_with_label() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("scrapped_data_Dessert_0_15.json"),
            r#"[{"vintage": {"id": 1}}, {"vintage": {"id": 2}}]"#,
        )
        .unwrap();

        let partition = source(dir.path())
            .load_partition("scrapped_data_Dessert_0_15.json")
            .await
            .unwrap();
        assert_eq!(partition.label, "Dessert");
        assert_eq!(partition.records.len(), 2);
    }

    #[tokio::test]
    async fn test_load_all_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scrapped_data_Red_a.json"), r#"[{"vintage": {"id": 1}}]"#).unwrap();
        fs::write(dir.path().join("scrapped_data_Red_b.json"), "{broken").unwrap();

        let partitions = source(dir.path()).load_all().await.unwrap();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].name, "scrapped_data_Red_a.json");
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = source(&dir.path().join("absent")).list_partitions().await;
        assert!(result.is_err());
    }
}
