use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MinioFile {
    minio: MinioConfig,
}

/// Bucket layout for raw partitions and uploaded outputs.
///
/// Credentials never live in the TOML file; they are read from the
/// environment variables named by `access_key_env` / `secret_key_env`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MinioConfig {
    pub endpoint: String,
    pub bucket_name: String,
    pub region: String,
    pub path_style: bool,
    pub raw_prefix: String,
    pub output_prefix: String,
    pub access_key_env: String,
    pub secret_key_env: String,
    #[serde(skip)]
    pub access_key: Option<String>,
    #[serde(skip)]
    pub secret_key: Option<String>,
}

impl Default for MinioConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            bucket_name: "wine-pipeline".to_string(),
            region: "us-east-1".to_string(),
            path_style: true,
            raw_prefix: "raw/".to_string(),
            output_prefix: "clean/".to_string(),
            access_key_env: "MINIO_ACCESS_KEY".to_string(),
            secret_key_env: "MINIO_SECRET_KEY".to_string(),
            access_key: None,
            secret_key: None,
        }
    }
}

impl MinioConfig {
    /// Parses the `[minio]` table and pulls credentials from the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read MinIO config file: {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse MinIO config file: {}", path.display()))?;
        config.load_credentials()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: MinioFile = toml::from_str(content)?;
        Ok(file.minio)
    }

    pub fn load_credentials(&mut self) -> Result<()> {
        self.access_key = Some(
            env::var(&self.access_key_env)
                .with_context(|| format!("Missing environment variable: {}", self.access_key_env))?,
        );
        self.secret_key = Some(
            env::var(&self.secret_key_env)
                .with_context(|| format!("Missing environment variable: {}", self.secret_key_env))?,
        );
        Ok(())
    }

    /// `(access_key, secret_key)` once loaded.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) => Ok((access, secret)),
            _ => bail!("MinIO credentials not loaded"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() || self.bucket_name.is_empty() {
            bail!("MinIO endpoint and bucket name must be set");
        }
        if self.raw_prefix == self.output_prefix {
            bail!("MinIO raw_prefix and output_prefix must differ");
        }
        self.credentials().map(|_| ())
    }
}
