//! Game state management.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::config::{GameConfig, LayoutOrder};
use crate::error::WorldResult;
use crate::minimap::{render, Minimap, RenderError, Scene, Surface, TraversalOrder};
use crate::world::validate::scalar_text;
use crate::world::{load_path, Direction, Exit, Item, Npc, Player, Room, WorldDocument};

/// Why the player could not move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The player has no location.
    #[error("the player is nowhere")]
    NoLocation,
    /// The player's location is not a room.
    #[error("the player is in {0}, which is not a room")]
    UnknownLocation(String),
    /// No exit leads that way.
    #[error("there is nothing {direction} of {room}")]
    NoExit {
        /// Current room.
        room: String,
        /// Requested direction.
        direction: Direction,
    },
    /// The exit names a room that does not exist, or is not a room name.
    #[error("going {direction} from {room} leads to {target}, which is not a room")]
    Dangling {
        /// Current room.
        room: String,
        /// Requested direction.
        direction: Direction,
        /// Name the exit points at.
        target: String,
    },
}

/// Complete game state.
///
/// The minimap is derived from the rooms at construction and is never
/// saved.
#[derive(Debug, Clone)]
pub struct Game {
    /// The player.
    pub player: Player,
    /// Rooms by name.
    pub rooms: BTreeMap<String, Room>,
    /// Items by name.
    pub items: BTreeMap<String, Item>,
    /// Non-player characters by name.
    pub npc: BTreeMap<String, Npc>,
    /// Minimap laid out from `rooms`.
    minimap: Minimap,
    /// Configuration the game was built with.
    config: GameConfig,
}

impl Game {
    /// Create a game from a loaded world.
    #[must_use]
    pub fn new(document: WorldDocument, config: GameConfig) -> Self {
        let WorldDocument {
            player,
            rooms,
            items,
            npc,
        } = document;

        let mut game = Self {
            player,
            rooms,
            items,
            npc,
            minimap: Minimap::default(),
            config,
        };
        game.relayout();
        game
    }

    /// Load a world file and create a game from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the world cannot be loaded.
    pub fn load(path: &Path, config: GameConfig) -> WorldResult<Self> {
        Ok(Self::new(load_path(path)?, config))
    }

    /// The configuration the game was built with.
    #[must_use]
    pub const fn config(&self) -> GameConfig {
        self.config
    }

    /// The current minimap.
    #[must_use]
    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    /// Name of the player's room.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.player.location()
    }

    /// The player's room, if it exists.
    #[must_use]
    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.get(self.location()?)
    }

    /// Lay the minimap out again. Call after changing `rooms`.
    pub fn relayout(&mut self) {
        let order = match (self.config.order, self.player.location()) {
            (LayoutOrder::FromPlayer, Some(start)) => TraversalOrder::BreadthFirst {
                start: start.to_string(),
            },
            _ => TraversalOrder::Sorted,
        };
        self.minimap = Minimap::build(&self.rooms, &order);
    }

    /// The minimap frame for the player's current room.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimap is empty or the player's room has no
    /// place on it.
    pub fn scene(&self) -> Result<Scene, RenderError> {
        Scene::build(&self.minimap, self.location())
    }

    /// Redraw the minimap on a surface.
    ///
    /// Call whenever the player moves or the world changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimap cannot be rendered or the surface
    /// fails.
    pub fn update<S: Surface>(&self, surface: &mut S) -> Result<(), RenderError> {
        render(&self.minimap, self.location(), surface)
    }

    /// Move the player through an exit. Returns the new room's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is nowhere, or no usable exit leads in
    /// that direction. The player does not move on error.
    pub fn move_player(&mut self, direction: Direction) -> Result<&str, MoveError> {
        let here = self.location().ok_or(MoveError::NoLocation)?;
        let room = self
            .rooms
            .get(here)
            .ok_or_else(|| MoveError::UnknownLocation(here.to_string()))?;

        let target = match room.exit(direction) {
            Exit::To(target) => target,
            Exit::Invalid(value) => {
                return Err(MoveError::Dangling {
                    room: here.to_string(),
                    direction,
                    target: scalar_text(value),
                });
            }
            Exit::Missing | Exit::Nothing => {
                return Err(MoveError::NoExit {
                    room: here.to_string(),
                    direction,
                });
            }
        };
        let Some((target, _)) = self.rooms.get_key_value(target) else {
            return Err(MoveError::Dangling {
                room: here.to_string(),
                direction,
                target: target.to_string(),
            });
        };

        tracing::debug!(from = here, to = %target, %direction, "player moved");
        let target = target.clone();
        self.player.move_to(&target);
        Ok(self.location().unwrap_or_default())
    }

    /// Snapshot the game in the world file format.
    #[must_use]
    pub fn save(&self) -> WorldDocument {
        WorldDocument {
            player: self.player.clone(),
            rooms: self.rooms.clone(),
            items: self.items.clone(),
            npc: self.npc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimap::AsciiSurface;
    use crate::world::load_str;

    const WORLD: &str = "
player:
  position: {location: Hall}
rooms:
  Hall:
    paths: {up: Attic, right: Study, left: Void, down: null, north: 7}
  Attic:
    paths: {down: Hall}
  Study:
    paths: {left: Hall}
  Closet:
    paths: {}
items: {}
";

    fn game() -> Game {
        Game::new(load_str(WORLD).unwrap(), GameConfig::default())
    }

    #[test]
    fn test_game_builds_minimap() {
        let game = game();
        assert_eq!(game.minimap().len(), 3);
        assert!(game.minimap().origin("Closet").is_none());
        assert_eq!(game.location(), Some("Hall"));
        assert!(game.current_room().is_some());
    }

    #[test]
    fn test_move_player() {
        let mut game = game();
        assert_eq!(game.move_player(Direction::Up).unwrap(), "Attic");
        assert_eq!(game.location(), Some("Attic"));
        assert_eq!(game.move_player(Direction::Down).unwrap(), "Hall");
    }

    #[test]
    fn test_move_errors_leave_player_in_place() {
        let mut game = game();
        assert_eq!(
            game.move_player(Direction::Down),
            Err(MoveError::NoExit {
                room: "Hall".to_string(),
                direction: Direction::Down
            })
        );
        assert!(matches!(
            game.move_player(Direction::Left),
            Err(MoveError::Dangling { .. })
        ));
        assert_eq!(
            game.move_player(Direction::North),
            Err(MoveError::Dangling {
                room: "Hall".to_string(),
                direction: Direction::North,
                target: "7".to_string()
            })
        );
        assert!(matches!(
            game.move_player(Direction::South),
            Err(MoveError::NoExit { .. })
        ));
        assert_eq!(game.location(), Some("Hall"));
    }

    #[test]
    fn test_update_highlights_current_room() {
        let mut game = game();
        let mut surface = AsciiSurface::new(false);
        game.update(&mut surface).unwrap();
        assert!(surface.output().contains("@=You (Hall)"));

        game.move_player(Direction::Right).unwrap();
        game.update(&mut surface).unwrap();
        assert!(surface.output().contains("@=You (Study)"));
    }

    #[test]
    fn test_update_fails_for_unplaced_room() {
        let mut game = game();
        game.player.move_to("Closet");
        let mut surface = AsciiSurface::new(false);
        assert_eq!(
            game.update(&mut surface),
            Err(RenderError::UnplacedLocation("Closet".to_string()))
        );
    }

    #[test]
    fn test_relayout_from_player() {
        let config = GameConfig {
            order: LayoutOrder::FromPlayer,
            ..GameConfig::default()
        };
        let game = Game::new(load_str(WORLD).unwrap(), config);
        assert!(game.minimap().conflicts().is_empty());
        assert_eq!(game.minimap().origin("Attic").map(|o| o.y), Some(0));
        assert_eq!(game.minimap().origin("Hall").map(|o| o.y), Some(1));
    }

    #[test]
    fn test_save_round_trip() {
        let game = game();
        let saved = game.save();
        let again = Game::new(saved.clone(), GameConfig::default()).save();
        assert_eq!(saved, again);
        assert!(saved.rooms.contains_key("Closet"));
    }
}
