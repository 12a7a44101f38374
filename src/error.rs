//! Crate error types.
//!
//! Combat operations never fail with these: invalid player commands are
//! rejected through plain return values. Errors here come from loading
//! content and from installing the log subscriber.

use std::path::PathBuf;

/// Failure to load or look up content records.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("enemy `{0}` defines no moves")]
    NoMoves(String),

    #[error("move `{move_id}` of enemy `{enemy_id}` has no intent")]
    MissingIntent { enemy_id: String, move_id: String },

    #[error("duplicate {kind} id `{id}`")]
    Duplicate { kind: &'static str, id: String },

    #[error("unknown {kind} id `{id}`")]
    Unknown { kind: &'static str, id: String },
}

impl ContentError {
    pub(crate) fn unknown(kind: &'static str, id: &str) -> Self {
        Self::Unknown {
            kind,
            id: id.to_string(),
        }
    }
}

/// Failure to install logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter `{filter}`: {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}
