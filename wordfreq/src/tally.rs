use dashmap::DashMap;

use crate::report::WordFrequency;

/// Word counts shared by every worker in a run.
///
/// Backed by a sharded map: an increment locks only the shard that owns the word, so
/// concurrent increments of the same word serialize on that shard and never lose an
/// update. Draining takes the tally by value, which means it can only happen once every
/// worker borrowing it has returned.
#[derive(Debug, Default)]
pub struct WordTally {
    counts: DashMap<String, u64>,
}

impl WordTally {
    /// Creates an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `word`
    pub fn increment(&self, word: &str) {
        // Fast path avoids allocating a key for words already seen
        if let Some(mut count) = self.counts.get_mut(word) {
            *count += 1;
            return;
        }
        *self.counts.entry(word.to_owned()).or_insert(0) += 1;
    }

    /// Current count for `word`, if it has been seen
    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).map(|count| *count)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// Consumes the tally, returning one record per distinct word in no particular order
    pub fn drain(self) -> Vec<WordFrequency> {
        self.counts
            .into_iter()
            .map(|(word, count)| WordFrequency::new(word, count))
            .collect()
    }
}
