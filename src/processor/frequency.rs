use std::collections::HashMap;

/// Frequency counter that ranks by count and breaks ties by first-seen order.
///
/// Counts are floats: record keyword counts may be fractional or near `i64::MAX`.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTally {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64)>,
}

impl FrequencyTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, count: f64) {
        match self.index.get(name) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), count));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The `n` highest-ranked names.
    pub fn top(&self, n: usize) -> Vec<&str> {
        let mut ranked: Vec<&(String, f64)> = self.entries.iter().collect();
        // stable: equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().take(n).map(|(name, _)| name.as_str()).collect()
    }

    pub fn top_joined(&self, n: usize, separator: &str) -> String {
        self.top(n).join(separator)
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = FrequencyTally::new();
        for name in iter {
            tally.add(name, 1.0);
        }
        tally
    }
}
