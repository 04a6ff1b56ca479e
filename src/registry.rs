// 🔍 Check Number Registry - duplicate detection across one file
// Keyed by the raw check-number string; the first occurrence wins

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CheckNumberRegistry {
    /// raw check number → line it was first seen on
    first_seen: HashMap<String, u64>,
}

impl CheckNumberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `check_number` as seen on `line`.
    ///
    /// Returns the line of the first occurrence when the number was already
    /// registered. Later occurrences never replace the first one, so a third
    /// duplicate still points back at the original line.
    pub fn register(&mut self, check_number: &str, line: u64) -> Option<u64> {
        match self.first_seen.get(check_number) {
            Some(first) => Some(*first),
            None => {
                self.first_seen.insert(check_number.to_string(), line);
                None
            }
        }
    }

    /// Number of distinct check numbers registered so far
    pub fn distinct_count(&self) -> usize {
        self.first_seen.len()
    }
}
