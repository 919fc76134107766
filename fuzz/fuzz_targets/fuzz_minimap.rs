#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use dork::minimap::{render_ascii, Scene, TraversalOrder};
use dork::{Direction, Minimap, Room};
use libfuzzer_sys::fuzz_target;

/// One exit: source room, grid direction, target room.
#[derive(Arbitrary, Debug)]
struct ExitInput {
    /// Source room index.
    from: u8,
    /// Index into the grid directions.
    direction: u8,
    /// Target room index. May name a room that does not exist.
    to: u8,
}

/// Structured input for layout fuzzing.
#[derive(Arbitrary, Debug)]
struct LayoutInput {
    /// Number of rooms.
    rooms: u8,
    /// Exits between them.
    exits: Vec<ExitInput>,
    /// Breadth-first start, if any.
    start: Option<u8>,
    /// Room the player stands in.
    location: u8,
}

fuzz_target!(|input: LayoutInput| {
    let count = usize::from(input.rooms % 32);
    let mut rooms: BTreeMap<String, Room> =
        (0..count).map(|i| (format!("R{i}"), Room::default())).collect();

    for exit in input.exits.iter().take(256) {
        let direction = Direction::GRID[usize::from(exit.direction % 4)];
        if let Some(room) = rooms.get_mut(&format!("R{}", usize::from(exit.from) % count.max(1))) {
            room.set_exit(direction, Some(&format!("R{}", exit.to % 40)));
        }
    }

    let order = match input.start {
        Some(start) => TraversalOrder::BreadthFirst { start: format!("R{start}") },
        None => TraversalOrder::Sorted,
    };
    let map = Minimap::build(&rooms, &order);

    // Layout invariants.
    if map.is_empty() {
        assert_eq!(map.width(), 0);
        assert_eq!(map.edges().count(), 0);
        return;
    }
    assert_eq!(map.origins().values().map(|o| o.x).min(), Some(0));
    assert_eq!(map.origins().values().map(|o| o.y).min(), Some(0));
    for (name, node) in map.room_map() {
        let origin = map.origin(name).unwrap();
        let id = usize::try_from(origin.x).unwrap() + usize::try_from(origin.y).unwrap() * map.width();
        assert_eq!(node.node_id, id);
    }
    for (a, b) in map.edges() {
        assert!(a < b);
    }

    // Rendering must never panic.
    let location = format!("R{}", input.location % 40);
    match Scene::build(&map, Some(&location)) {
        Ok(scene) => {
            assert_eq!(scene.highlighted().map(|n| n.label.as_str()), Some(location.as_str()));
            let text = render_ascii(&scene, true);
            assert!(text.contains(&format!("@=You ({location})")));
        }
        Err(_) => assert!(map.origin(&location).is_none()),
    }
});
