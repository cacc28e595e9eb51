use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Failures raised while loading or writing AE tables.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("decode {path}: {reason}")]
    Encoding { path: PathBuf, reason: String },
}

impl IngestError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        IngestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        IngestError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn encoding(path: &std::path::Path, reason: impl Into<String>) -> Self {
        IngestError::Encoding {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
