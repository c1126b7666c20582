use anyhow::Result;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wine_pipeline::config::PipelineConfig;
use wine_pipeline::processor::{CategoryReport, STYLES};
use wine_pipeline::storage::{LocalPartitionSource, PartitionSource};

/// Prints distinct-vintage and raw-row counts per wine style.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    dotenv::dotenv().ok();

    let mut config = match env::var("WINE_PIPELINE_CONFIG") {
        Ok(path) => PipelineConfig::from_file(path)?,
        Err(_) => PipelineConfig::default(),
    };
    if let Some(dir) = env::args().nth(1) {
        config.input.dir = dir.into();
    }

    let source = LocalPartitionSource::from_config(&config.input)?;
    let partitions = source.load_all().await?;
    info!("Counting {} partitions in {}", partitions.len(), source.dir().display());

    CategoryReport::build(&partitions, &STYLES).log();

    Ok(())
}
