//! Non-player characters.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A non-player character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Hit points.
    #[serde(default)]
    pub health: Option<Value>,
    /// Attack strength.
    #[serde(default)]
    pub attack: Option<Value>,
    /// Points awarded for defeating this character.
    #[serde(default)]
    pub points: Option<Value>,
}

/// Keys every NPC is expected to carry.
pub const NPC_FIELDS: [&str; 3] = ["health", "attack", "points"];
