use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Naming of run-scoped output objects.
pub struct StorageManager;

impl StorageManager {
    pub fn new_run_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// `{prefix}{YYYY/MM/DD}/{HHMMSS}-{run_id}/{file_name}`
    pub fn output_key(prefix: &str, run_id: &str, file_name: &str, at: DateTime<Utc>) -> String {
        format!(
            "{}{}/{}-{}/{}",
            prefix,
            at.format("%Y/%m/%d"),
            at.format("%H%M%S"),
            run_id,
            file_name
        )
    }
}
