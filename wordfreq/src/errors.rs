//! Error types for wordfreq.
//!
//! Every failure a worker can hit is scoped to a single file, so most variants carry the
//! path that produced them. The engine logs these and moves on; only the variants raised
//! before dispatch (`MissingArguments`, `ThreadPool`, `ConfigError`) stop a run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for analysis operations
pub type TallyResult<T> = Result<T, TallyError>;

/// Errors that can occur while counting words or writing the report
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Failed to open {path}: {source}")]
    OpenFailed { path: PathBuf, source: io::Error },
    #[error("Read error in {path} at line {line}: {source}")]
    ReadFailed {
        path: PathBuf,
        line: usize,
        source: io::Error,
    },
    #[error("Invalid UTF-8 in {path} at line {line}")]
    InvalidEncoding { path: PathBuf, line: usize },
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite { path: PathBuf, source: io::Error },
    #[error("No input files given")]
    MissingArguments,
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TallyError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    /// Classifies a failure to open `path`
    pub fn open_failed(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::file_not_found(path),
            io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::OpenFailed {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn read_failed(path: impl Into<PathBuf>, line: usize, source: io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            line,
            source,
        }
    }

    pub fn invalid_encoding(path: impl Into<PathBuf>, line: usize) -> Self {
        Self::InvalidEncoding {
            path: path.into(),
            line,
        }
    }

    pub fn report_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReportWrite {
            path: path.into(),
            source,
        }
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_classification() {
        let path = Path::new("missing.txt");

        let err = TallyError::open_failed(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, TallyError::FileNotFound(_)));

        let err = TallyError::open_failed(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, TallyError::PermissionDenied(_)));

        let err = TallyError::open_failed(path, io::Error::new(io::ErrorKind::Other, "busy"));
        assert!(matches!(err, TallyError::OpenFailed { .. }));
    }

    #[test]
    fn test_error_messages() {
        let err = TallyError::file_not_found("test.txt");
        assert_eq!(err.to_string(), "File not found: test.txt");

        let err = TallyError::invalid_encoding("data.txt", 3);
        assert_eq!(err.to_string(), "Invalid UTF-8 in data.txt at line 3");

        let err = TallyError::read_failed(
            "data.txt",
            7,
            io::Error::new(io::ErrorKind::Other, "device gone"),
        );
        assert_eq!(
            err.to_string(),
            "Read error in data.txt at line 7: device gone"
        );

        let err = TallyError::config_error("Missing required field");
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field"
        );

        assert_eq!(
            TallyError::MissingArguments.to_string(),
            "No input files given"
        );
    }
}
