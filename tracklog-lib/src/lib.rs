//! Core library for Tracklog, a music listening diary.
//!
//! The [`Entry`] type describes one logged listen. [`EntryHolder`] owns a single
//! fixed entry for display, and the [`Repository`] persists entries to a JSON file.

use std::path::PathBuf;

use thiserror::Error;

pub mod entry;
pub mod fs;
pub mod holder;
pub mod repository;

pub use entry::Entry;
pub use holder::EntryHolder;
pub use repository::Repository;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed entry file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("Every entry id is in use")]
    IdsExhausted,
    #[error("Entry id {0} is already in use")]
    IdTaken(u32),
    #[error("Unable to locate the home directory")]
    NoHomeDir,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
