//! World layer for dork.
//!
//! Plain records loaded from a world file, and the game that owns them:
//! - Rooms with directional exits, items, NPCs and the player
//! - Loading with structural checks
//! - Referential integrity validation
//! - The game: movement, minimap updates and save snapshots

mod direction;
mod document;
mod game;
mod item;
mod loader;
mod npc;
mod player;
mod room;
mod validate;

pub use direction::Direction;
pub use document::{SnapshotFormat, WorldDocument};
pub use game::{Game, MoveError};
pub use item::{Item, HOLDS, ITEM_FIELDS};
pub use loader::{check_structure, from_value, load_path, load_str, read_value, REQUIRED_SECTIONS};
pub use npc::{Npc, NPC_FIELDS};
pub use player::{Player, Position};
pub use room::{Exit, Paths, Room};
pub use validate::{validate, Finding, Report, Severity};
