pub mod local_source;
pub mod minio_client;
pub mod partition_source;
pub mod storage_manager;

pub use local_source::LocalPartitionSource;
pub use minio_client::MinioStorage;
pub use partition_source::*;
pub use storage_manager::StorageManager;
