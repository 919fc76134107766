//! CLI command implementations for Dork.

pub(crate) mod map;
pub(crate) mod play;
pub(crate) mod save;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use dork::{DEFAULT_WORLD_PATH, LayoutOrder};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the `validate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// One diagnostic per line.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `map` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MapFormat {
    /// ASCII minimap.
    Text,
    /// Layout (origins, node ids, edges) as JSON.
    Json,
}

/// Output format for the `save` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SaveFormat {
    /// Same format as world files.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl From<SaveFormat> for dork::world::SnapshotFormat {
    fn from(format: SaveFormat) -> Self {
        match format {
            SaveFormat::Yaml => Self::Yaml,
            SaveFormat::Json => Self::Json,
        }
    }
}

/// Room order for the minimap layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OrderArg {
    /// Visit rooms by name.
    Sorted,
    /// Breadth-first from the player's room.
    FromPlayer,
}

impl From<OrderArg> for LayoutOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Sorted => Self::Sorted,
            OrderArg::FromPlayer => Self::FromPlayer,
        }
    }
}

/// The world file to use, falling back to the default.
pub(crate) fn world_path(world: Option<PathBuf>) -> PathBuf {
    world.unwrap_or_else(|| PathBuf::from(DEFAULT_WORLD_PATH))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<dork::WorldError> for CliError {
    fn from(e: dork::WorldError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<dork::StructureError> for CliError {
    fn from(e: dork::StructureError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<dork::RenderError> for CliError {
    fn from(e: dork::RenderError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
