//! Errors surfaced by the intention layer.

use crate::edit::RewriteError;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised when an intention cannot be run.
#[derive(Debug, Error)]
pub enum IntentionError {
    /// The intention does not apply at the requested offset
    #[error("intention '{id}' is not available at offset {offset}")]
    NotAvailable {
        /// Intention id
        id: String,
        /// Byte offset that was asked about
        offset: usize,
    },
    /// No intention is registered under this id
    #[error("unknown intention '{0}'")]
    UnknownIntention(String),
    /// The prepared splices did not fit the text
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// The source file could not be read or written
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
