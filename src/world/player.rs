//! Player state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Where the player is.
///
/// Only `location` is interpreted; any other keys are carried through a
/// save untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Name of the room the player is in.
    #[serde(default)]
    pub location: Option<String>,
    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// State for the player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current position.
    #[serde(default)]
    pub position: Option<Position>,
    /// Carried items. Free-form.
    #[serde(default)]
    pub inventory: Option<Value>,
    /// Player statistics. Free-form.
    #[serde(default)]
    pub stats: Option<Value>,
}

impl Player {
    /// Create a player standing in `location`.
    #[must_use]
    pub fn at(location: &str) -> Self {
        Self {
            position: Some(Position {
                location: Some(location.to_string()),
                extra: BTreeMap::new(),
            }),
            ..Self::default()
        }
    }

    /// Name of the room the player is in, if known.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.position.as_ref()?.location.as_deref()
    }

    /// Move the player to another room.
    ///
    /// This should only be called after checking that `room` exists.
    pub fn move_to(&mut self, room: &str) {
        self.position
            .get_or_insert_with(Position::default)
            .location = Some(room.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_location() {
        let player = Player::at("Foyer");
        assert_eq!(player.location(), Some("Foyer"));
        assert_eq!(Player::default().location(), None);
    }

    #[test]
    fn test_player_move_to_creates_position() {
        let mut player = Player::default();
        player.move_to("Cellar");
        assert_eq!(player.location(), Some("Cellar"));
    }

    #[test]
    fn test_position_keeps_unknown_keys() {
        let yaml = "position:\n  location: Foyer\n  facing: north\ninventory: [lamp]\n";
        let player: Player = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(player.location(), Some("Foyer"));

        let position = player.position.as_ref().unwrap();
        assert_eq!(position.extra.get("facing"), Some(&Value::from("north")));

        let text = serde_yaml::to_string(&player).unwrap();
        assert!(text.contains("facing: north"));
    }
}
