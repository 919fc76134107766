//! Room records and their exits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::world::Direction;

/// What a room's `paths` mapping says about one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit<'a> {
    /// The direction is not a key of `paths` (or `paths` is absent).
    Missing,
    /// The direction is present but null: nothing lies that way.
    Nothing,
    /// The direction leads to the named room.
    To(&'a str),
    /// The direction holds something that is not a room name.
    Invalid(&'a Value),
}

impl<'a> Exit<'a> {
    /// The destination room name, if any.
    #[must_use]
    pub const fn target(self) -> Option<&'a str> {
        match self {
            Exit::To(name) => Some(name),
            Exit::Missing | Exit::Nothing | Exit::Invalid(_) => None,
        }
    }
}

/// Directional exits of a room, keyed by direction name.
///
/// Key presence is kept so a missing key and a null value stay
/// distinguishable after a load/save round trip. Values are kept as
/// written, so a malformed exit survives loading and saving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paths(BTreeMap<String, Value>);

impl Paths {
    /// Look up the exit in a direction.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Exit<'_> {
        match self.0.get(direction.key()) {
            None => Exit::Missing,
            Some(Value::Null) => Exit::Nothing,
            Some(Value::String(name)) => Exit::To(name),
            Some(other) => Exit::Invalid(other),
        }
    }

    /// Set (or clear, with `None`) the exit in a direction.
    pub fn set(&mut self, direction: Direction, target: Option<&str>) {
        self.0.insert(
            direction.key().to_string(),
            target.map_or(Value::Null, Value::from),
        );
    }
}

/// A room on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Flavour text shown to the player. Free-form.
    #[serde(default)]
    pub messages: Option<Value>,
    /// Door description. Free-form.
    #[serde(default)]
    pub door: Option<Value>,
    /// Encounter description. Free-form.
    #[serde(default)]
    pub fight: Option<Value>,
    /// Directional exits.
    #[serde(default)]
    pub paths: Option<Paths>,
}

impl Room {
    /// Look up the exit in a direction.
    #[must_use]
    pub fn exit(&self, direction: Direction) -> Exit<'_> {
        self.paths
            .as_ref()
            .map_or(Exit::Missing, |paths| paths.get(direction))
    }

    /// Set (or clear) the exit in a direction, creating `paths` if needed.
    pub fn set_exit(&mut self, direction: Direction, target: Option<&str>) {
        self.paths
            .get_or_insert_with(Paths::default)
            .set(direction, target);
    }

    /// Builder-style [`Room::set_exit`] leading to `target`.
    #[must_use]
    pub fn with_exit(mut self, direction: Direction, target: &str) -> Self {
        self.set_exit(direction, Some(target));
        self
    }

    /// Iterate over the grid exits that lead somewhere.
    pub fn grid_exits(&self) -> impl Iterator<Item = (Direction, &str)> {
        Direction::GRID
            .into_iter()
            .filter_map(|d| self.exit(d).target().map(|name| (d, name)))
    }
}
