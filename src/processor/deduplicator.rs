use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::path_extractor::get;
use super::record_projector::{RecordProjector, VINTAGE_ID_PATH};
use crate::error::ProjectionError;
use crate::models::{FlatRow, FlatTable, Partition};

/// What to do with a record that carries no vintage identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIdPolicy {
    #[default]
    Skip,
    Fail,
}

/// Vintage identifiers already emitted during one run.
///
/// Ids are keyed by their JSON form, so `1` and `"1"` stay distinct.
#[derive(Debug, Default)]
pub struct SeenVintages {
    ids: HashSet<String>,
}

impl SeenVintages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as seen; `true` if it was not seen before.
    pub fn insert(&mut self, id: &Value) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &Value) -> bool {
        self.ids.contains(&id.to_string())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub partitions: usize,
    pub raw_records: usize,
    pub rows: usize,
    pub duplicates_skipped: usize,
    pub missing_ids: usize,
}

#[derive(Debug, Clone)]
pub struct CollectOutcome {
    pub table: FlatTable,
    pub stats: CollectStats,
}

/// Builds the flat table, emitting each vintage at most once (first partition wins).
pub struct Deduplicator {
    projector: RecordProjector,
    policy: MissingIdPolicy,
}

impl Deduplicator {
    pub fn new(policy: MissingIdPolicy) -> Self {
        Deduplicator {
            projector: RecordProjector::new(),
            policy,
        }
    }

    pub fn collect<'p, I>(&self, partitions: I) -> Result<CollectOutcome, ProjectionError>
    where
        I: IntoIterator<Item = &'p Partition>,
    {
        let mut seen = SeenVintages::new();
        let mut rows = Vec::new();
        let mut stats = CollectStats::default();

        for partition in partitions {
            self.process_partition(partition, &mut seen, &mut rows, &mut stats)?;
        }

        stats.rows = rows.len();
        info!(
            "Collected {} rows from {} raw records across {} partitions ({} duplicates, {} without id)",
            stats.rows, stats.raw_records, stats.partitions, stats.duplicates_skipped, stats.missing_ids
        );

        Ok(CollectOutcome {
            table: FlatTable::new(rows),
            stats,
        })
    }

    /// Projects the not-yet-seen records of one partition into `rows`.
    pub fn process_partition(
        &self,
        partition: &Partition,
        seen: &mut SeenVintages,
        rows: &mut Vec<FlatRow>,
        stats: &mut CollectStats,
    ) -> Result<(), ProjectionError> {
        let before = rows.len();
        let mut duplicates = 0;

        for (index, record) in partition.records.iter().enumerate() {
            stats.raw_records += 1;

            let vintage_id = get(record, VINTAGE_ID_PATH).filter(|id| !id.is_object() && !id.is_array());
            let Some(vintage_id) = vintage_id else {
                let error = ProjectionError::MissingVintageId {
                    partition: partition.name.clone(),
                    index,
                };
                match self.policy {
                    MissingIdPolicy::Fail => return Err(error),
                    MissingIdPolicy::Skip => {
                        warn!("Skipping record: {}", error);
                        stats.missing_ids += 1;
                        continue;
                    }
                }
            };

            if seen.insert(vintage_id) {
                rows.push(self.projector.project(record, &partition.label));
            } else {
                duplicates += 1;
            }
        }

        stats.partitions += 1;
        stats.duplicates_skipped += duplicates;
        debug!(
            "Partition {} [{}]: {} records, {} new rows, {} duplicates",
            partition.name,
            partition.label,
            partition.records.len(),
            rows.len() - before,
            duplicates
        );

        Ok(())
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(MissingIdPolicy::default())
    }
}
