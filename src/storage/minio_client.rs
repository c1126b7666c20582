use anyhow::{Result, anyhow};
use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use tracing::{debug, info};

use super::partition_source::{PartitionNaming, PartitionSource, parse_records};
use crate::config::MinioConfig;
use crate::models::Partition;

/// Partition objects and pipeline outputs kept in a MinIO/S3 bucket.
pub struct MinioStorage {
    bucket: Bucket,
    raw_prefix: String,
    naming: PartitionNaming,
}

impl MinioStorage {
    pub fn from_config(config: &MinioConfig, naming: PartitionNaming) -> Result<Self> {
        config.validate()?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let (access_key, secret_key) = config.credentials()?;
        let credentials = Credentials::new(
            Some(access_key),
            Some(secret_key),
            None, // security_token
            None, // session_token
            None, // expiration
        )?;

        let bucket = Bucket::new(&config.bucket_name, region, credentials)?;

        // MinIO needs path-style addressing
        let bucket = if config.path_style {
            *bucket.with_path_style()
        } else {
            *bucket
        };

        Ok(MinioStorage {
            bucket,
            raw_prefix: config.raw_prefix.clone(),
            naming,
        })
    }

    pub fn get_bucket_name(&self) -> &str {
        &self.bucket.name
    }

    pub async fn ensure_bucket(&self) -> Result<()> {
        match self.bucket.exists().await {
            Ok(true) => {
                info!("Bucket '{}' already exists", self.bucket.name);
            }
            Ok(false) => {
                let config = s3::BucketConfiguration::default();
                s3::Bucket::create(
                    &self.bucket.name,
                    self.bucket.region.clone(),
                    self.bucket.credentials().await?,
                    config,
                )
                .await
                .map_err(|e| anyhow!("Failed to create bucket: {}", e))?;
                info!("Created bucket: {}", self.bucket.name);
            }
            Err(e) => {
                return Err(anyhow!("Failed to check bucket existence: {}", e));
            }
        }
        Ok(())
    }

    pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
        let list = self.bucket.list(prefix.to_string(), None).await?;

        let mut object_names = Vec::new();
        for result in list {
            for object in result.contents {
                object_names.push(object.key);
            }
        }

        Ok(object_names)
    }

    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let response = self.bucket.get_object(key).await?;

        if response.status_code() == 200 {
            Ok(response.bytes().to_vec())
        } else {
            Err(anyhow!(
                "Failed to get object {}: HTTP {}",
                key,
                response.status_code()
            ))
        }
    }

    pub async fn store_object(&self, key: &str, data: &[u8]) -> Result<String> {
        let response = self.bucket.put_object(key, data).await?;

        if response.status_code() == 200 {
            info!("Stored object: {}", key);
            Ok(key.to_string())
        } else {
            Err(anyhow!(
                "Failed to store object {}: HTTP {}",
                key,
                response.status_code()
            ))
        }
    }
}

#[async_trait]
impl PartitionSource for MinioStorage {
    async fn list_partitions(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .list_objects(&self.raw_prefix)
            .await?
            .into_iter()
            .filter(|key| self.naming.matches(key))
            .collect();

        keys.sort();
        info!(
            "Listed {} partition objects under {}/{}",
            keys.len(),
            self.bucket.name,
            self.raw_prefix
        );
        Ok(keys)
    }

    async fn load_partition(&self, key: &str) -> Result<Partition> {
        let label = self
            .naming
            .label_for(key)
            .ok_or_else(|| anyhow!("Cannot derive a category label from {}", key))?;

        let bytes = self.get_object(key).await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| anyhow!("Partition {} is not valid UTF-8: {}", key, e))?;
        let records = parse_records(key, &content)?;

        debug!("Loaded {} records from {} [{}]", records.len(), key, label);
        Ok(Partition::new(key, label, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naming() -> PartitionNaming {
        PartitionNaming::new("scrapped_data_", "json").unwrap()
    }

    fn config_with_credentials() -> MinioConfig {
        MinioConfig {
            access_key: Some("test_access".to_string()),
            secret_key: Some("test_secret".to_string()),
            ..MinioConfig::default()
        }
    }

    #[test]
    fn test_minio_from_config() {
        let storage = MinioStorage::from_config(&config_with_credentials(), naming()).unwrap();
        assert_eq!(storage.get_bucket_name(), "wine-pipeline");
    }

    #[test]
    fn test_from_config_requires_credentials() {
        assert!(MinioStorage::from_config(&MinioConfig::default(), naming()).is_err());
    }

    #[tokio::test]
    async fn test_partition_round_trip() {
        // Needs a running MinIO instance
        if std::env::var("MINIO_TEST_ENABLED").is_err() {
            return;
        }

        let mut config = MinioConfig::default();
        config.access_key = Some("minioadmin".to_string());
        config.secret_key = Some("minioadmin".to_string());
        config.bucket_name = "wine-pipeline-test".to_string();

        let storage = MinioStorage::from_config(&config, naming()).unwrap();
        storage.ensure_bucket().await.unwrap();
        storage
            .store_object("raw/scrapped_data_Red_0_15.json", br#"[{"vintage": {"id": 1}}]"#)
            .await
            .unwrap();

        let keys = storage.list_partitions().await.unwrap();
        assert!(keys.contains(&"raw/scrapped_data_Red_0_15.json".to_string()));

        let partition = storage
            .load_partition("raw/scrapped_data_Red_0_15.json")
            .await
            .unwrap();
        assert_eq!(partition.label, "Red");
        assert_eq!(partition.records.len(), 1);
    }
}
