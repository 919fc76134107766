//! The world document: everything a world file holds.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};
use crate::world::{Item, Npc, Player, Room};

/// Encoding used when writing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// Same format as world files.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// A whole world, as loaded from or saved to a file.
///
/// Saving emits every known field, with absent ones as null, so
/// `save(load(save(load(d))))` equals `save(load(d))`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldDocument {
    /// Player state.
    pub player: Player,
    /// Rooms by name.
    pub rooms: BTreeMap<String, Room>,
    /// Items by name.
    pub items: BTreeMap<String, Item>,
    /// Non-player characters by name.
    #[serde(default)]
    pub npc: BTreeMap<String, Npc>,
}

impl WorldDocument {
    /// Encode as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if a free-form field cannot be encoded.
    pub fn to_yaml(&self) -> WorldResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a free-form field has no JSON equivalent.
    pub fn to_json(&self) -> WorldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encode in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self, format: SnapshotFormat) -> WorldResult<String> {
        match format {
            SnapshotFormat::Yaml => self.to_yaml(),
            SnapshotFormat::Json => self.to_json(),
        }
    }

    /// Write a snapshot to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_path(&self, path: &Path, format: SnapshotFormat) -> WorldResult<()> {
        let text = self.encode(format)?;
        fs::write(path, text).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), rooms = self.rooms.len(), "saved world snapshot");
        Ok(())
    }
}
