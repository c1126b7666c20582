use thiserror::Error;

/// Upstream contract violations surfaced while assembling the flat table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("record {index} in partition '{partition}' has no vintage identifier")]
    MissingVintageId { partition: String, index: usize },
}
