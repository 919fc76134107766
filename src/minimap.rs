//! Minimap for the world.
//!
//! - Grid layout of rooms from their directional exits
//! - Scenes: what one frame of the minimap shows
//! - Surfaces to draw scenes on (ASCII text here, a terminal UI in the binary)

mod ascii;
mod layout;
mod render;

pub use ascii::{render_ascii, AsciiSurface};
pub use layout::{Conflict, Minimap, NodeId, Origin, RoomNode, TraversalOrder};
pub use render::{render, PlotPoint, RenderError, Scene, SceneNode, Surface};
