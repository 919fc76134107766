//! Game configuration.

/// World file used when none is given on the command line.
pub const DEFAULT_WORLD_PATH: &str = "dork.yml";

/// How rooms are ordered when the minimap is laid out.
///
/// Layout is first-come-first-placed, so the order decides which of two
/// inconsistent paths wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutOrder {
    /// Visit rooms by name.
    #[default]
    Sorted,
    /// Breadth-first from the player's room, then remaining rooms by name.
    FromPlayer,
}

/// Configuration for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Room order for the minimap layout.
    pub order: LayoutOrder,
    /// Use ANSI colors when rendering to text.
    pub color: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            order: LayoutOrder::Sorted,
            color: true,
        }
    }
}
