use serde_json::Value;
use tracing::debug;

use super::frequency::FrequencyTally;
use super::path_extractor::{get_array, get_f64, get_str};

pub const FLAVOR_GROUPS_PATH: &str = "vintage.wine.taste.flavor";
pub const FLAVOR_SEPARATOR: &str = "; ";

/// Keyword evidence class inside a flavor group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordTier {
    Primary,
    Secondary,
}

impl KeywordTier {
    pub fn field_name(&self) -> &'static str {
        match self {
            KeywordTier::Primary => "primary_keywords",
            KeywordTier::Secondary => "secondary_keywords",
        }
    }
}

/// Ranks flavor keywords across all flavor groups of a record.
#[derive(Debug, Clone)]
pub struct FlavorAggregator {
    top_n: usize,
}

impl FlavorAggregator {
    pub fn new(top_n: usize) -> Self {
        FlavorAggregator { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// `(name, count)` pairs of one tier, in group order then keyword order.
    pub fn collect_tier(groups: &[Value], tier: KeywordTier) -> Vec<(String, f64)> {
        groups
            .iter()
            .flat_map(|group| get_array(group, tier.field_name()))
            .filter_map(|keyword| {
                let name = get_str(keyword, "name").filter(|n| !n.is_empty())?;
                let count = get_f64(keyword, "count").unwrap_or(0.0);
                Some((name.to_string(), count))
            })
            .collect()
    }

    /// Primary keywords, or the secondary tier when no primary keyword is named.
    pub fn select_keywords(groups: &[Value]) -> (KeywordTier, Vec<(String, f64)>) {
        let primary = Self::collect_tier(groups, KeywordTier::Primary);
        let primary_tier_empty = primary.is_empty();
        if primary_tier_empty {
            (KeywordTier::Secondary, Self::collect_tier(groups, KeywordTier::Secondary))
        } else {
            (KeywordTier::Primary, primary)
        }
    }

    pub fn top_flavors(&self, record: &Value) -> String {
        let groups = get_array(record, FLAVOR_GROUPS_PATH);
        let (tier, keywords) = Self::select_keywords(groups);
        if keywords.is_empty() {
            return String::new();
        }

        let mut tally = FrequencyTally::new();
        for (name, count) in &keywords {
            tally.add(name, *count);
        }
        debug!(
            "Aggregated {} keywords into {} flavors from {:?} tier",
            keywords.len(),
            tally.len(),
            tier
        );

        tally.top_joined(self.top_n, FLAVOR_SEPARATOR)
    }
}
