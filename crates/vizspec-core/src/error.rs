//! Error types for the composition engine.
//!
//! Engine commands never fail; they absorb bad input as no-ops. The errors
//! here come from the edges that do I/O or parse text: the editor buffer,
//! the collection file and the settings file.

use std::path::PathBuf;

use thiserror::Error;
use vizspec_model::ModelError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Editor text did not parse into a spec.
    #[error("editor buffer rejected: {0}")]
    Editor(#[source] ModelError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid collection file {path}: {source}")]
    CollectionFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
