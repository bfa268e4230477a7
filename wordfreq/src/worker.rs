use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::config::EncodingMode;
use crate::errors::{TallyError, TallyResult};
use crate::metrics::RunMetrics;
use crate::stopwords::is_countable;
use crate::tally::WordTally;
use crate::tokenizer::{normalize, tokens};

const BUFFER_CAPACITY: usize = 65536;

/// What a worker got through in one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    /// Lines fully processed
    pub lines: u64,
    /// Tokens added to the tally
    pub counted: u64,
    /// Non-empty tokens dropped as stopwords
    pub filtered: u64,
}

/// Streams the words of one file into a shared tally
#[derive(Debug, Clone)]
pub struct FileWorker<'a> {
    tally: &'a WordTally,
    metrics: RunMetrics,
    encoding_mode: EncodingMode,
}

impl<'a> FileWorker<'a> {
    pub fn new(tally: &'a WordTally, metrics: RunMetrics, encoding_mode: EncodingMode) -> Self {
        Self {
            tally,
            metrics,
            encoding_mode,
        }
    }

    /// Counts every word in `path`.
    ///
    /// An open failure contributes nothing. A failure partway through leaves the counts of
    /// the lines already read in the tally and returns the error.
    pub fn process_file(&self, path: &Path) -> TallyResult<FileSummary> {
        trace!("Processing file: {}", path.display());

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                self.metrics.record_file_failure();
                return Err(TallyError::open_failed(path, e));
            }
        };

        let mut summary = FileSummary {
            path: path.to_path_buf(),
            ..FileSummary::default()
        };
        let outcome = self.scan(BufReader::with_capacity(BUFFER_CAPACITY, file), &mut summary);

        self.metrics
            .record_scan(summary.lines, summary.counted, summary.filtered);
        match outcome {
            Ok(()) => {
                self.metrics.record_file_success();
                debug!(
                    "Finished {}: {} lines, {} words counted, {} stopwords skipped",
                    path.display(),
                    summary.lines,
                    summary.counted,
                    summary.filtered
                );
                Ok(summary)
            }
            Err(e) => {
                self.metrics.record_file_failure();
                Err(e)
            }
        }
    }

    fn scan<R: BufRead>(&self, mut reader: R, summary: &mut FileSummary) -> TallyResult<()> {
        let mut buffer = Vec::with_capacity(256);
        loop {
            buffer.clear();
            let line_number = summary.lines as usize + 1;
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| TallyError::read_failed(&summary.path, line_number, e))?;
            if read == 0 {
                return Ok(());
            }

            let line = self.decode(&buffer, &summary.path, line_number)?;
            self.count_line(&line, summary);
            summary.lines += 1;
        }
    }

    fn decode<'b>(&self, bytes: &'b [u8], path: &Path, line: usize) -> TallyResult<Cow<'b, str>> {
        match self.encoding_mode {
            EncodingMode::FailFast => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|_| TallyError::invalid_encoding(path, line)),
            EncodingMode::Lossy => Ok(String::from_utf8_lossy(bytes)),
        }
    }

    fn count_line(&self, line: &str, summary: &mut FileSummary) {
        let normalized = normalize(line);
        for token in tokens(&normalized) {
            if is_countable(token) {
                self.tally.increment(token);
                summary.counted += 1;
            } else if !token.is_empty() {
                summary.filtered += 1;
            }
        }
    }
}
