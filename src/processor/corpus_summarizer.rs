use std::collections::BTreeMap;
use tracing::debug;

use super::frequency::FrequencyTally;
use super::text_normalizer::split_multi;
use crate::models::{FlatTable, TextField};

pub const SUMMARY_SEPARATOR: &str = ";";
pub const TOP_VARIETAL_FLAVORS: usize = 6;
pub const TOP_VARIETAL_FOODS: usize = 3;

pub struct CorpusSummarizer;

impl CorpusSummarizer {
    /// Top-k tokens of `value_field` per exact value of `group_key`.
    ///
    /// Rows without a group key are left out. Tokens are trimmed and
    /// lower-cased; ties keep the order in which tokens first appear in the group.
    pub fn summarize(
        table: &FlatTable,
        group_key: TextField,
        value_field: TextField,
        top_k: usize,
    ) -> BTreeMap<String, String> {
        let mut groups: BTreeMap<String, FrequencyTally> = BTreeMap::new();

        for row in table.rows() {
            let Some(key) = row.text(group_key) else {
                continue;
            };
            let tally = groups.entry(key.to_string()).or_default();
            if let Some(values) = row.text(value_field) {
                for token in split_multi(values, true, None) {
                    tally.add(&token, 1.0);
                }
            }
        }

        debug!(
            "Summarized {} by {} into {} groups",
            value_field.column_name(),
            group_key.column_name(),
            groups.len()
        );

        groups
            .into_iter()
            .map(|(key, tally)| (key, tally.top_joined(top_k, SUMMARY_SEPARATOR)))
            .collect()
    }

    pub fn varietal_flavors(table: &FlatTable) -> BTreeMap<String, String> {
        Self::summarize(table, TextField::VarietalName, TextField::TopFlavors, TOP_VARIETAL_FLAVORS)
    }

    pub fn varietal_foods(table: &FlatTable) -> BTreeMap<String, String> {
        Self::summarize(table, TextField::VarietalName, TextField::RelevantFood, TOP_VARIETAL_FOODS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarietalProfile {
    pub top_flavors: String,
    pub top_food: String,
}

/// Per-varietal flavor and food profile of a whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarietalSummary {
    pub varietals: BTreeMap<String, VarietalProfile>,
}

impl VarietalSummary {
    pub fn build(table: &FlatTable) -> Self {
        let mut foods = CorpusSummarizer::varietal_foods(table);
        let varietals = CorpusSummarizer::varietal_flavors(table)
            .into_iter()
            .map(|(varietal, top_flavors)| {
                let top_food = foods.remove(&varietal).unwrap_or_default();
                (varietal, VarietalProfile { top_flavors, top_food })
            })
            .collect();
        VarietalSummary { varietals }
    }

    pub fn len(&self) -> usize {
        self.varietals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.varietals.is_empty()
    }

    /// `"flavors | food"` for one varietal.
    pub fn describe(&self, varietal: &str) -> Option<String> {
        self.varietals
            .get(varietal)
            .map(|p| format!("{} | {}", p.top_flavors, p.top_food))
    }
}
