//! Exit directions.

use std::fmt;

use serde::Serialize;

/// A direction an exit can lead in.
///
/// The four grid directions drive the minimap layout. The compass
/// directions are carried in world files and validated, but never laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Grid direction, one row towards the top of the minimap.
    Up,
    /// Grid direction, one row towards the bottom of the minimap.
    Down,
    /// Grid direction, one column to the left.
    Left,
    /// Grid direction, one column to the right.
    Right,
    /// Compass direction.
    North,
    /// Compass direction.
    South,
    /// Compass direction.
    East,
    /// Compass direction.
    West,
}

impl Direction {
    /// Grid directions, in the order the layout visits them.
    pub const GRID: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Every direction the validator checks, grid first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The key used for this direction in a room's `paths` mapping.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Grid displacement `(dx, dy)` for this direction.
    ///
    /// `y` grows downwards, so `Up` is `(0, -1)`. Returns `None` for compass
    /// directions.
    #[must_use]
    pub const fn offset(self) -> Option<(i32, i32)> {
        match self {
            Direction::Up => Some((0, -1)),
            Direction::Down => Some((0, 1)),
            Direction::Left => Some((-1, 0)),
            Direction::Right => Some((1, 0)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
