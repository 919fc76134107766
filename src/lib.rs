// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Dork: a YAML-described text adventure world with a live minimap.
//!
//! This crate provides:
//! - Loading of world files (rooms, items, NPCs, player) with structural checks
//! - Referential integrity validation of room exits and records
//! - A grid layout of rooms from their up/down/left/right exits
//! - A minimap that highlights the player's room, drawn on any [`minimap::Surface`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      CLI (validate, map, play)      │
//! ├─────────────────────────────────────┤
//! │   Game          │   Minimap render  │
//! ├─────────────────┼───────────────────┤
//! │   World records │   Minimap layout  │
//! ├─────────────────┴───────────────────┤
//! │        World file (YAML)            │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod minimap;
pub mod world;

pub use config::{GameConfig, LayoutOrder, DEFAULT_WORLD_PATH};
pub use error::{StructureError, WorldError, WorldResult};

// Re-export key types at crate root for convenience
pub use minimap::{Minimap, Origin, RenderError, Scene, Surface};
pub use world::{Direction, Game, Room, WorldDocument};
