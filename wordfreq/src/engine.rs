use rayon::ThreadPoolBuilder;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::errors::{TallyError, TallyResult};
use crate::metrics::RunMetrics;
use crate::report::Report;
use crate::tally::WordTally;
use crate::worker::FileWorker;

/// Stages of a run, entered strictly in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Idle,
    Dispatching,
    Waiting,
    Aggregating,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Dispatching => "dispatching",
            RunPhase::Waiting => "waiting",
            RunPhase::Aggregating => "aggregating",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

struct PhaseTracker {
    phase: RunPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
        }
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(next > self.phase, "run phases only move forward");
        debug!("Run phase: {} -> {}", self.phase, next);
        self.phase = next;
    }
}

/// Counts words across every file in `config` and builds the report.
///
/// One task is spawned per file on a dedicated pool. The scope returns only after every
/// task has finished, successfully or not, and only then is the tally drained. Per-file
/// failures are logged and otherwise ignored; a failed file still counts as processed.
pub fn analyze(config: &AnalysisConfig) -> TallyResult<Report> {
    let mut tracker = PhaseTracker::new();

    if config.files.is_empty() {
        return Err(TallyError::MissingArguments);
    }

    info!(
        "Starting analysis of {} files on {} threads",
        config.files.len(),
        config.thread_count
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()
        .map_err(|e| TallyError::thread_pool(e.to_string()))?;

    let tally = WordTally::new();
    let metrics = RunMetrics::new();
    let worker = FileWorker::new(&tally, metrics.clone(), config.encoding_mode);

    tracker.advance(RunPhase::Dispatching);
    pool.scope(|scope| {
        for path in &config.files {
            let worker = worker.clone();
            scope.spawn(move |_| {
                if let Err(e) = worker.process_file(path) {
                    warn!("Skipping {}: {}", path.display(), e);
                }
            });
        }
        tracker.advance(RunPhase::Waiting);
    });

    tracker.advance(RunPhase::Aggregating);
    drop(worker);
    let report = Report::from_records(tally.drain(), config.files.len());
    metrics.log_stats();

    tracker.advance(RunPhase::Done);
    info!(
        "Analysis complete. {} unique words, {} total words in {} files",
        report.unique_words, report.total_words, report.files_processed
    );

    Ok(report)
}
