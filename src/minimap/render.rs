//! Turning a laid-out minimap into something drawable.
//!
//! A [`Scene`] is the full description of one frame: nodes with labels and
//! plot positions, edges, and which node is the player's. Surfaces only
//! ever see scenes, so layout and highlighting are testable without a
//! terminal.

use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::minimap::{Minimap, NodeId};

/// Why a minimap could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No room has a grid coordinate.
    #[error("the minimap is empty: no room has a grid exit")]
    Empty,
    /// The player has no location.
    #[error("the player has no location")]
    NoLocation,
    /// The player's room was never placed on the grid.
    #[error("the player is in {0}, which has no place on the minimap")]
    UnplacedLocation(String),
    /// The surface failed to draw.
    #[error("drawing failed: {0}")]
    Surface(String),
}

/// A plot position. `y` grows upwards, so rooms reached by going up are
/// drawn higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlotPoint {
    /// Column.
    pub x: usize,
    /// Row, counted from the bottom.
    pub y: usize,
}

/// A room as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneNode {
    /// Node id.
    pub id: NodeId,
    /// Room name.
    pub label: String,
    /// Where to draw the node.
    pub position: PlotPoint,
    /// Whether the player is in this room.
    pub highlighted: bool,
}

/// One frame of the minimap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// Nodes, by room name.
    pub nodes: Vec<SceneNode>,
    /// Undirected edges as `(low, high)` node id pairs.
    pub edges: Vec<(NodeId, NodeId)>,
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
}

impl Scene {
    /// Build the frame for a player standing in `location`.
    ///
    /// # Errors
    ///
    /// Fails rather than mis-highlight: if the minimap is empty, the
    /// location is unknown, or the location was never placed.
    pub fn build(minimap: &Minimap, location: Option<&str>) -> Result<Self, RenderError> {
        if minimap.is_empty() {
            return Err(RenderError::Empty);
        }
        let location = location.ok_or(RenderError::NoLocation)?;
        if minimap.node(location).is_none() {
            return Err(RenderError::UnplacedLocation(location.to_string()));
        }

        let max_y = minimap.height().saturating_sub(1);
        let nodes = minimap
            .room_map()
            .iter()
            .filter_map(|(name, node)| {
                let origin = minimap.origin(name)?;
                let x = usize::try_from(origin.x).ok()?;
                let y = usize::try_from(origin.y).ok()?;
                Some(SceneNode {
                    id: node.node_id,
                    label: name.clone(),
                    position: PlotPoint {
                        x,
                        y: max_y.saturating_sub(y),
                    },
                    highlighted: name == location,
                })
            })
            .collect();

        Ok(Self {
            nodes,
            edges: minimap.edges().collect(),
            width: minimap.width(),
            height: minimap.height(),
        })
    }

    /// First node with an id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The player's node.
    #[must_use]
    pub fn highlighted(&self) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.highlighted)
    }

    /// Edges with both endpoints resolved to nodes.
    pub fn edge_nodes(&self) -> impl Iterator<Item = (&SceneNode, &SceneNode)> {
        self.edges
            .iter()
            .filter_map(|&(a, b)| Some((self.node(a)?, self.node(b)?)))
    }
}

/// Something a scene can be drawn on.
///
/// Each call repaints the whole surface.
pub trait Surface {
    /// Error raised by the drawing backend.
    type Error: Display;

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if drawing fails.
    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}

/// Build the frame for `location` and draw it.
///
/// # Errors
///
/// Returns an error if the scene cannot be built or the surface fails.
pub fn render<S: Surface>(
    minimap: &Minimap,
    location: Option<&str>,
    surface: &mut S,
) -> Result<(), RenderError> {
    let scene = Scene::build(minimap, location)?;
    surface
        .draw(&scene)
        .map_err(|e| RenderError::Surface(e.to_string()))
}
