//! Error types for loading and saving worlds.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The world document has the wrong shape to build a game from.
///
/// These abort loading: no partial game state is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The top level of the document is not a mapping.
    #[error("the world document is not a mapping")]
    NotAMapping,
    /// A required top-level section is missing.
    #[error("No {0} found.")]
    MissingSection(&'static str),
    /// A top-level section is present but is not a mapping.
    #[error("{0} in data were not proper data.")]
    SectionNotAMapping(&'static str),
    /// An entry of a section has a name that is not a string.
    #[error("{section} contains an entry whose name is not a string: {name}")]
    EntryName {
        /// Section holding the entry.
        section: &'static str,
        /// Debug rendering of the offending key.
        name: String,
    },
    /// An entry of a section is not a mapping.
    #[error("{section} entry {name} is not a mapping")]
    EntryNotAMapping {
        /// Section holding the entry.
        section: &'static str,
        /// Entry name.
        name: String,
    },
}

/// Errors raised while reading or writing a world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// File could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Document is not valid YAML or does not match the record types.
    #[error("invalid world YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Snapshot could not be encoded as JSON.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Document has the wrong shape.
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Result type for world loading and saving.
pub type WorldResult<T> = Result<T, WorldError>;
