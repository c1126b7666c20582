use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wine_pipeline::config::{MinioConfig, PipelineConfig};
use wine_pipeline::pipeline;
use wine_pipeline::storage::{LocalPartitionSource, MinioStorage, PartitionNaming};

const DEFAULT_CONFIG_PATH: &str = "src/configs/pipeline.toml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    dotenv::dotenv().ok();

    let from_storage = env::args().any(|arg| arg == "--from-storage" || arg == "-s");
    let config_path = env::var("WINE_PIPELINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = if Path::new(&config_path).exists() {
        PipelineConfig::from_file(&config_path)?
    } else {
        warn!("Config file not found at {}, using defaults", config_path);
        PipelineConfig::default()
    };

    let minio = match &config.storage.minio_config {
        Some(path) => {
            let minio_config = MinioConfig::from_file(path).context("Failed to load MinIO configuration")?;
            info!(
                "Loaded MinIO configuration: {}@{}",
                minio_config.endpoint, minio_config.bucket_name
            );
            let naming = PartitionNaming::new(&config.input.file_prefix, &config.input.extension)?;
            let storage = MinioStorage::from_config(&minio_config, naming)
                .context("Failed to initialize MinIO storage")?;
            storage.ensure_bucket().await?;
            Some((storage, minio_config.output_prefix))
        }
        None => None,
    };

    let upload = minio
        .as_ref()
        .map(|(storage, prefix)| (storage, prefix.as_str()));

    let summary = if from_storage {
        let (storage, _) = upload.context("--from-storage requires storage.minio_config to be set")?;
        info!("Processing partitions from bucket {}", storage.get_bucket_name());
        pipeline::run(&config, storage, upload).await?
    } else {
        let source = LocalPartitionSource::from_config(&config.input)?;
        info!("Processing partitions from {}", source.dir().display());
        pipeline::run(&config, &source, upload).await?
    };

    info!("Table written to {}", summary.outputs.table.display());
    info!("Sample written to {}", summary.outputs.sample.display());
    for key in &summary.uploaded {
        info!("Uploaded {}", key);
    }

    Ok(())
}
