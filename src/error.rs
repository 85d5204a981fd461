//! Errors that end a run (or, for `SaveJson`, the save step).
//!
//! Per-item problems such as an invalid URL or one unreadable input file are
//! logged and skipped instead; they never reach this type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdaruError {
    /// Neither piped stdin nor any `--input-file` was given.
    #[error("You must provide URLs via stdin or files")]
    NoInput,

    /// The spool file could not be created or written.
    #[error("Failed to use spool file {}", .path.display())]
    Spool {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to save sitemap to {}", .path.display())]
    SaveJson {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
