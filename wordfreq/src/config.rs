use config::{Config as ConfigBuilder, File};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::{TallyError, TallyResult};

/// Configuration for an analysis run.
///
/// # Configuration Locations
///
/// Values are layered, later sources overriding earlier ones:
/// 1. Global `$HOME/.config/wordfreq/config.yaml`
/// 2. Local `.wordfreq.yaml` in the current directory
/// 3. A file passed with `--config`
/// 4. Command-line flags, applied with [`AnalysisConfig::merge_with_cli`]
///
/// A default location that fails to parse is logged and skipped. Only a file passed
/// explicitly can fail the load.
///
/// # Configuration Format
///
/// ```yaml
/// # Worker pool size (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
///
/// # How to handle invalid UTF-8 (failfast, lossy)
/// encoding_mode: "lossy"
/// ```
///
/// Input files only ever come from the command line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Files to analyze, one worker each
    #[serde(skip)]
    pub files: Vec<PathBuf>,

    /// Number of threads in the worker pool
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// How lines that are not valid UTF-8 are handled
    pub encoding_mode: EncodingMode,
}

/// Handling of invalid UTF-8 in input files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Abandon the file at the first invalid line
    #[default]
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep going
    Lossy,
}

impl std::str::FromStr for EncodingMode {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "failfast" => Ok(Self::FailFast),
            "lossy" => Ok(Self::Lossy),
            other => Err(TallyError::config_error(format!(
                "Unknown encoding mode '{}', expected failfast or lossy",
                other
            ))),
        }
    }
}

/// Values given on the command line. `None` leaves the configured value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub files: Vec<PathBuf>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
    pub encoding_mode: Option<EncodingMode>,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            encoding_mode: EncodingMode::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a default configuration for the given files
    pub fn for_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Loads configuration, adding an explicit file on top of the default locations
    pub fn load_from(config_path: Option<&Path>) -> TallyResult<Self> {
        let defaults = [
            dirs::config_dir().map(|p| p.join("wordfreq/config.yaml")),
            Some(PathBuf::from(".wordfreq.yaml")),
        ];
        let defaults: Vec<PathBuf> = defaults.into_iter().flatten().collect();
        Self::load_layers(&defaults, config_path)
    }

    fn load_layers(defaults: &[PathBuf], config_path: Option<&Path>) -> TallyResult<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(TallyError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        let mut layers: Vec<&Path> = Vec::new();
        for path in defaults.iter().filter(|p| p.exists()) {
            match Self::deserialize_layers(&[path.as_path()]) {
                Ok(_) => layers.push(path),
                Err(e) => warn!("Ignoring config file {}: {}", path.display(), e),
            }
        }
        layers.extend(config_path);

        Self::deserialize_layers(&layers)
    }

    fn deserialize_layers(paths: &[&Path]) -> TallyResult<Self> {
        paths
            .iter()
            .fold(ConfigBuilder::builder(), |builder, path| {
                builder.add_source(File::from(*path))
            })
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| TallyError::config_error(e.to_string()))
    }

    /// Applies command-line values on top of file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        self.files = cli.files;
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(mode) = cli.encoding_mode {
            self.encoding_mode = mode;
        }
        self
    }
}
