pub mod config;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod report;
pub mod stopwords;
pub mod tally;
pub mod tokenizer;
pub mod worker;

pub use config::{AnalysisConfig, CliOverrides, EncodingMode};
pub use engine::{analyze, RunPhase};
pub use errors::{TallyError, TallyResult};
pub use report::{Report, WordFrequency, REPORT_FILE_NAME, TOP_N};
pub use tally::WordTally;
