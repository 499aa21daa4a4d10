//! Error type for parsing, accessing and writing config files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Diagnostics;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error on `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error on stream")]
    Stream(#[from] io::Error),

    /// The parse aborted; the full log is attached.
    // No #[from]: the log is the payload, not a source
    #[error("{0}")]
    Syntax(Diagnostics),

    #[error("no key `{key}` in section `{section}`")]
    KeyNotFound { section: String, key: String },

    #[error("value {value:?} contains {found:?}, which cannot be stored in a value")]
    InvalidValue { value: String, found: char },

    #[error("cannot store non-finite number {0}")]
    NonFinite(f64),

    #[error("document has no backing file")]
    NoSource,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The diagnostics log, for syntax errors.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Syntax(log) => Some(log),
            _ => None,
        }
    }
}
