//! Aggregation and rendering of the final word counts.
//!
//! A [`Report`] is built once from a drained [`WordTally`](crate::tally::WordTally) and is
//! immutable afterwards. Ranking is fully deterministic: records are ordered by count,
//! highest first, and words with equal counts are ordered alphabetically. The drain order
//! of the tally therefore never leaks into the output.
//!
//! Rendering produces the exact text that is printed and persisted:
//!
//! ```text
//! Word Frequency Analysis Report
//! ------------------------------
//! 1. fox: 2
//! 2. jumps: 1
//!
//! Total unique words: 2
//! Total word count: 3
//! Files processed: 1
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{TallyError, TallyResult};

/// Number of ranked entries shown in the report
pub const TOP_N: usize = 15;

/// File the CLI persists the report to, relative to the working directory
pub const REPORT_FILE_NAME: &str = "word_frequency_report.txt";

const TITLE: &str = "Word Frequency Analysis Report";

/// A single word and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }

    /// Ranking order: count descending, then word ascending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Sorts records into ranking order
pub fn rank(records: &mut [WordFrequency]) {
    records.sort_by(WordFrequency::rank_cmp);
}

/// The finished analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Highest ranked records, at most [`TOP_N`]
    pub top_words: Vec<WordFrequency>,
    /// Number of distinct counted words
    pub unique_words: usize,
    /// Sum of counts over every word, not just the top entries
    pub total_words: u64,
    /// Number of files a worker was launched for, including ones that failed
    pub files_processed: usize,
}

impl Report {
    /// Builds a report from drained tally records
    pub fn from_records(mut records: Vec<WordFrequency>, files_processed: usize) -> Self {
        let unique_words = records.len();
        let total_words = records.iter().map(|r| r.count).sum::<u64>();

        rank(&mut records);
        records.truncate(TOP_N);

        debug!(
            "Aggregated {} unique words, {} occurrences",
            unique_words, total_words
        );

        Self {
            top_words: records,
            unique_words,
            total_words,
            files_processed,
        }
    }

    /// Renders the report text
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Writes the rendered report to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> TallyResult<()> {
        fs::write(path, self.render()).map_err(|e| TallyError::report_write(path, e))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", "-".repeat(TITLE.len()))?;
        for (rank, entry) in self.top_words.iter().enumerate() {
            writeln!(f, "{}. {}: {}", rank + 1, entry.word, entry.count)?;
        }
        writeln!(f)?;
        writeln!(f, "Total unique words: {}", self.unique_words)?;
        writeln!(f, "Total word count: {}", self.total_words)?;
        writeln!(f, "Files processed: {}", self.files_processed)
    }
}
