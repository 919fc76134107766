//! Grid layout of rooms.
//!
//! Rooms carry no coordinates, only directional exits. The layout walks
//! the exits in a fixed order and places each newly reached room one cell
//! away from the room it was reached from:
//!
//! ```text
//!   up: (x, y-1)    down: (x, y+1)    left: (x-1, y)    right: (x+1, y)
//! ```
//!
//! The first placement of a room wins. Inconsistent exits are not
//! reconciled; rooms that end up sharing a cell are reported as
//! [`Conflict`]s instead.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;

use crate::world::{Direction, Room};

/// Identifier of a room in the minimap graph.
///
/// After layout this is the row-major cell index `x + y * width`.
pub type NodeId = usize;

/// A room's grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Origin {
    /// Column.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Origin {
    /// Create a new origin.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in a direction. Compass directions stay put.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset().unwrap_or((0, 0));
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Order in which rooms are visited during layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// By room name.
    #[default]
    Sorted,
    /// Breadth-first along grid exits from `start`, then breadth-first from
    /// each room not yet reached, by name.
    BreadthFirst {
        /// Room to start from.
        start: String,
    },
}

/// A room's place in the minimap graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomNode {
    /// Node id of the room.
    pub node_id: NodeId,
    /// Node ids of its neighbours, sorted.
    pub edges: Vec<NodeId>,
}

/// Several rooms placed on the same cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// The shared cell.
    pub origin: Origin,
    /// Node id of the shared cell.
    pub node_id: NodeId,
    /// Rooms on the cell, by name.
    pub rooms: Vec<String>,
}

/// Laid-out minimap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Minimap {
    /// Origins as assigned, before normalization.
    raw_origins: BTreeMap<String, Origin>,
    /// Origins shifted so no coordinate is negative.
    origins: BTreeMap<String, Origin>,
    /// Node id and neighbours for each placed room.
    room_map: BTreeMap<String, RoomNode>,
    /// Undirected edges as `(low, high)` node id pairs.
    edges: BTreeSet<(NodeId, NodeId)>,
    /// Grid width in cells.
    width: usize,
    /// Grid height in cells.
    height: usize,
    /// Cells holding more than one room.
    conflicts: Vec<Conflict>,
}

impl Minimap {
    /// Lay out `rooms`.
    ///
    /// Only grid exits to existing rooms are followed; null, dangling and
    /// self-referential exits produce no edge. Rooms no grid exit touches
    /// are left out. If no room is placed the minimap is empty.
    #[must_use]
    pub fn build(rooms: &BTreeMap<String, Room>, order: &TraversalOrder) -> Self {
        let order = traversal(rooms, order);
        let provisional: BTreeMap<&str, usize> =
            order.iter().enumerate().map(|(id, name)| (*name, id)).collect();

        let mut origins: BTreeMap<&str, Origin> = BTreeMap::new();
        let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();

        for &name in &order {
            let Some(room) = rooms.get(name) else {
                continue;
            };
            for (direction, target) in room.grid_exits() {
                let Some((target, _)) = rooms.get_key_value(target) else {
                    tracing::debug!(room = name, %direction, to = target, "skipping exit to unknown room");
                    continue;
                };
                let target = target.as_str();

                let source = *origins.entry(name).or_default();
                if target == name {
                    continue;
                }
                origins.entry(target).or_insert_with(|| source.step(direction));

                let (a, b) = (provisional[name], provisional[target]);
                edges.insert((a.min(b), a.max(b)));
            }
        }

        if origins.is_empty() {
            tracing::debug!(rooms = rooms.len(), "no grid exits; minimap is empty");
            return Self::default();
        }

        let raw_origins: BTreeMap<String, Origin> = origins
            .iter()
            .map(|(name, origin)| ((*name).to_string(), *origin))
            .collect();

        // Shift into the non-negative quadrant.
        let dx = origins.values().map(|o| o.x).min().unwrap_or(0);
        let dy = origins.values().map(|o| o.y).min().unwrap_or(0);
        for origin in origins.values_mut() {
            if dx < 0 {
                origin.x += dx.abs();
            }
            if dy < 0 {
                origin.y += dy.abs();
            }
        }

        let width = cell(origins.values().map(|o| o.x).max().unwrap_or(0)) + 1;
        let height = cell(origins.values().map(|o| o.y).max().unwrap_or(0)) + 1;
        let node_id = |origin: Origin| cell(origin.x) + cell(origin.y) * width;

        let final_id: BTreeMap<usize, NodeId> = origins
            .iter()
            .map(|(name, origin)| (provisional[name], node_id(*origin)))
            .collect();

        let mut neighbours: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &(a, b) in &edges {
            neighbours.entry(a).or_default().push(b);
            neighbours.entry(b).or_default().push(a);
        }

        let room_map = origins
            .iter()
            .map(|(name, origin)| {
                let own = node_id(*origin);
                // Rooms collapsed onto one cell do not neighbour themselves.
                let mut ids: Vec<NodeId> = neighbours
                    .get(&provisional[name])
                    .into_iter()
                    .flatten()
                    .filter_map(|p| final_id.get(p).copied())
                    .filter(|&id| id != own)
                    .collect();
                ids.sort_unstable();
                ids.dedup();
                let node = RoomNode {
                    node_id: own,
                    edges: ids,
                };
                ((*name).to_string(), node)
            })
            .collect();

        let final_edges = edges
            .iter()
            .filter_map(|(a, b)| Some((*final_id.get(a)?, *final_id.get(b)?)))
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();

        let conflicts = find_conflicts(&origins, width);
        for conflict in &conflicts {
            tracing::warn!(
                x = conflict.origin.x,
                y = conflict.origin.y,
                rooms = ?conflict.rooms,
                "rooms share a minimap cell"
            );
        }

        tracing::debug!(
            placed = origins.len(),
            rooms = rooms.len(),
            width,
            height,
            edges = edges.len(),
            "minimap laid out"
        );

        Self {
            raw_origins,
            origins: origins
                .into_iter()
                .map(|(name, origin)| (name.to_string(), origin))
                .collect(),
            room_map,
            edges: final_edges,
            width,
            height,
            conflicts,
        }
    }

    /// Check if no room was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Number of placed rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Grid width in cells (0 when empty).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells (0 when empty).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Normalized origins by room name.
    #[must_use]
    pub fn origins(&self) -> &BTreeMap<String, Origin> {
        &self.origins
    }

    /// Origins before normalization.
    #[must_use]
    pub fn raw_origins(&self) -> &BTreeMap<String, Origin> {
        &self.raw_origins
    }

    /// Normalized origin of a room.
    #[must_use]
    pub fn origin(&self, room: &str) -> Option<Origin> {
        self.origins.get(room).copied()
    }

    /// Node id and neighbours by room name.
    #[must_use]
    pub fn room_map(&self) -> &BTreeMap<String, RoomNode> {
        &self.room_map
    }

    /// Node id and neighbours of a room.
    #[must_use]
    pub fn node(&self, room: &str) -> Option<&RoomNode> {
        self.room_map.get(room)
    }

    /// Undirected edges as `(low, high)` node id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().copied()
    }

    /// Cells holding more than one room.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
}

/// Coordinates are non-negative after normalization.
fn cell(v: i32) -> usize {
    usize::try_from(v).unwrap_or_default()
}

/// Room names in visiting order. Every room appears exactly once.
fn traversal<'a>(rooms: &'a BTreeMap<String, Room>, order: &TraversalOrder) -> Vec<&'a str> {
    let TraversalOrder::BreadthFirst { start } = order else {
        return rooms.keys().map(String::as_str).collect();
    };

    let root = rooms.get_key_value(start.as_str()).map(|(k, _)| k.as_str());
    if root.is_none() {
        tracing::warn!(%start, "layout start room does not exist; using name order");
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::with_capacity(rooms.len());

    for root in root.into_iter().chain(rooms.keys().map(String::as_str)) {
        if !seen.insert(root) {
            continue;
        }
        let mut queue = VecDeque::from([root]);
        while let Some(name) = queue.pop_front() {
            out.push(name);
            let Some(room) = rooms.get(name) else {
                continue;
            };
            for (_, target) in room.grid_exits() {
                if let Some((key, _)) = rooms.get_key_value(target)
                    && seen.insert(key.as_str())
                {
                    queue.push_back(key.as_str());
                }
            }
        }
    }

    out
}

fn find_conflicts(origins: &BTreeMap<&str, Origin>, width: usize) -> Vec<Conflict> {
    let mut cells: BTreeMap<Origin, Vec<String>> = BTreeMap::new();
    for (name, origin) in origins {
        cells.entry(*origin).or_default().push((*name).to_string());
    }
    cells
        .into_iter()
        .filter(|(_, rooms)| rooms.len() > 1)
        .map(|(origin, rooms)| Conflict {
            origin,
            node_id: cell(origin.x) + cell(origin.y) * width,
            rooms,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms(layout: &[(&str, &[(Direction, &str)])]) -> BTreeMap<String, Room> {
        layout.iter()
            .map(|(name, exits)| {
                let room = exits
                    .iter()
                    .fold(Room::default(), |room, (d, t)| room.with_exit(*d, t));
                ((*name).to_string(), room)
            })
            .collect()
    }

    #[test]
    fn test_right_left_pair() {
        let rooms = rooms(&[
            ("A", &[(Direction::Right, "B")]),
            ("B", &[(Direction::Left, "A")]),
        ]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);

        assert_eq!(map.origin("A"), Some(Origin::new(0, 0)));
        assert_eq!(map.origin("B"), Some(Origin::new(1, 0)));
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 1);
        assert_eq!(map.node("A").unwrap().node_id, 0);
        assert_eq!(map.node("B").unwrap().node_id, 1);
        assert_eq!(map.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert!(map.conflicts().is_empty());
    }

    #[test]
    fn test_up_down_pair_normalizes() {
        let rooms = rooms(&[
            ("A", &[(Direction::Up, "B")]),
            ("B", &[(Direction::Down, "A")]),
        ]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);

        assert_eq!(map.raw_origins()["A"], Origin::new(0, 0));
        assert_eq!(map.raw_origins()["B"], Origin::new(0, -1));
        assert_eq!(map.origin("A"), Some(Origin::new(0, 1)));
        assert_eq!(map.origin("B"), Some(Origin::new(0, 0)));
        assert_eq!(map.width(), 1);
        assert_eq!(map.node("A").unwrap().node_id, 1);
        assert_eq!(map.node("B").unwrap().node_id, 0);
    }

    #[test]
    fn test_isolated_room_is_absent() {
        let mut rooms = rooms(&[("A", &[(Direction::Right, "B")]), ("B", &[])]);
        let mut closed = Room::default();
        for d in Direction::GRID {
            closed.set_exit(d, None);
        }
        rooms.insert("C".to_string(), closed);

        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        assert_eq!(map.len(), 2);
        assert!(map.origin("C").is_none());
        assert!(map.node("C").is_none());
    }

    #[test]
    fn test_dangling_exit_is_skipped() {
        let rooms = rooms(&[("A", &[(Direction::Right, "Ghost")])]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        assert!(map.is_empty());
        assert_eq!(map.width(), 0);
        assert!(map.origin("Ghost").is_none());
    }

    #[test]
    fn test_no_rooms_is_empty() {
        let map = Minimap::build(&BTreeMap::new(), &TraversalOrder::Sorted);
        assert!(map.is_empty());
        assert_eq!(map.height(), 0);
        assert_eq!(map.edges().count(), 0);
    }

    #[test]
    fn test_self_exit_places_room_without_edge() {
        let rooms = rooms(&[("Loop", &[(Direction::Up, "Loop")])]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        assert_eq!(map.origin("Loop"), Some(Origin::new(0, 0)));
        assert_eq!(map.edges().count(), 0);
        assert!(map.node("Loop").unwrap().edges.is_empty());
    }

    #[test]
    fn test_first_assignment_wins() {
        // B is reached from A (right) before C claims it is below C.
        let rooms = rooms(&[
            ("A", &[(Direction::Right, "B")]),
            ("B", &[]),
            ("C", &[(Direction::Down, "B")]),
        ]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        assert_eq!(map.raw_origins()["B"], Origin::new(1, 0));
        // C gets the default origin and lands on A's cell.
        assert_eq!(map.raw_origins()["C"], Origin::new(0, 0));
        assert_eq!(map.conflicts().len(), 1);
        assert_eq!(map.conflicts()[0].rooms, vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_collapsed_rooms_agree_with_edges() {
        // C is placed on A's cell, so the A-C edge collapses.
        let rooms = rooms(&[
            ("A", &[(Direction::Right, "B")]),
            ("B", &[]),
            ("C", &[(Direction::Left, "A")]),
        ]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        assert_eq!(map.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(map.node("A").unwrap().edges, vec![1]);
        assert_eq!(map.node("B").unwrap().edges, vec![0]);
        assert!(map.node("C").unwrap().edges.is_empty());

        let edges: BTreeSet<_> = map.edges().collect();
        for node in map.room_map().values() {
            for &other in &node.edges {
                let pair = (node.node_id.min(other), node.node_id.max(other));
                assert!(edges.contains(&pair));
            }
        }
    }

    #[test]
    fn test_breadth_first_from_start() {
        // By name, Attic is placed before Hall reaches it, so Hall falls
        // back to (0,0) and lands on Attic. From Hall, everything fits.
        let rooms = rooms(&[
            ("Attic", &[(Direction::Right, "Study")]),
            ("Hall", &[(Direction::Up, "Attic")]),
            ("Study", &[]),
        ]);

        let sorted = Minimap::build(&rooms, &TraversalOrder::Sorted);
        assert_eq!(sorted.conflicts().len(), 1);

        let order = TraversalOrder::BreadthFirst {
            start: "Hall".to_string(),
        };
        let map = Minimap::build(&rooms, &order);
        assert_eq!(map.origin("Attic"), Some(Origin::new(0, 0)));
        assert_eq!(map.origin("Study"), Some(Origin::new(1, 0)));
        assert_eq!(map.origin("Hall"), Some(Origin::new(0, 1)));
        assert!(map.conflicts().is_empty());
    }

    #[test]
    fn test_traversal_visits_every_room_once() {
        let rooms = rooms(&[
            ("A", &[(Direction::Right, "B")]),
            ("B", &[(Direction::Right, "A")]),
            ("Z", &[]),
        ]);
        let order = TraversalOrder::BreadthFirst {
            start: "B".to_string(),
        };
        assert_eq!(traversal(&rooms, &order), vec!["B", "A", "Z"]);

        let missing = TraversalOrder::BreadthFirst {
            start: "Nowhere".to_string(),
        };
        assert_eq!(traversal(&rooms, &missing), vec!["A", "B", "Z"]);
    }

    #[test]
    fn test_edges_are_symmetric() {
        let rooms = rooms(&[
            ("A", &[(Direction::Right, "B"), (Direction::Down, "C")]),
            ("B", &[]),
            ("C", &[]),
        ]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        let a = map.node("A").unwrap();
        let b = map.node("B").unwrap();
        let c = map.node("C").unwrap();
        assert!(a.edges.contains(&b.node_id));
        assert!(b.edges.contains(&a.node_id));
        assert!(c.edges.contains(&a.node_id));
        assert!(!b.edges.contains(&c.node_id));
    }

    #[test]
    fn test_node_id_is_row_major() {
        let rooms = rooms(&[
            ("A", &[(Direction::Right, "B"), (Direction::Down, "C")]),
            ("B", &[]),
            ("C", &[(Direction::Right, "D")]),
            ("D", &[]),
        ]);
        let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
        let width = map.width();
        assert_eq!(width, 2);
        for (name, origin) in map.origins() {
            let expected = usize::try_from(origin.x + origin.y * 2).unwrap();
            assert_eq!(map.node(name).unwrap().node_id, expected);
        }
        assert_eq!(map.node("D").unwrap().node_id, 3);
    }
}
