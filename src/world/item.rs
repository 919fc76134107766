//! Item records.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// An item in the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Text shown when the item is examined. Free-form.
    #[serde(default)]
    pub description: Option<Value>,
    /// Damage dealt when used as a weapon.
    #[serde(default)]
    pub damage: Option<Value>,
    /// What the item contains: a name, a list of names, or null. Free-form.
    #[serde(default)]
    pub holds: Option<Value>,
}

/// Key naming what an item contains.
pub const HOLDS: &str = "holds";

/// Keys every item is expected to carry, besides [`HOLDS`].
pub const ITEM_FIELDS: [&str; 2] = ["description", "damage"];
