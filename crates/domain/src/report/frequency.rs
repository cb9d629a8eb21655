use std::collections::{BTreeMap, HashMap};

/// Summed quantities per key, remembering first-seen order
///
/// Both extremes break ties by the key encountered first.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, quantity: u64) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += quantity,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), quantity));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn most_frequent(&self) -> Option<&str> {
        let mut best: Option<&(String, u64)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key.as_str())
    }

    pub fn least_frequent(&self) -> Option<&str> {
        let mut best: Option<&(String, u64)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 < b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.entries.iter().cloned().collect()
    }
}
