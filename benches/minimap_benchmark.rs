//! Benchmarks for minimap layout and rendering.
//!
//! Worlds are square grids of rooms linked to all four neighbours, the
//! densest layout a world file can describe.

#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dork::minimap::{TraversalOrder, render_ascii};
use dork::{Direction, Minimap, Room, Scene};

fn name(x: usize, y: usize) -> String {
    format!("R{x}_{y}")
}

/// A `side` x `side` grid of fully linked rooms.
fn grid(side: usize) -> BTreeMap<String, Room> {
    let mut rooms = BTreeMap::new();
    for y in 0..side {
        for x in 0..side {
            let mut room = Room::default();
            if y > 0 {
                room.set_exit(Direction::Up, Some(&name(x, y - 1)));
            }
            if y + 1 < side {
                room.set_exit(Direction::Down, Some(&name(x, y + 1)));
            }
            if x > 0 {
                room.set_exit(Direction::Left, Some(&name(x - 1, y)));
            }
            if x + 1 < side {
                room.set_exit(Direction::Right, Some(&name(x + 1, y)));
            }
            rooms.insert(name(x, y), room);
        }
    }
    rooms
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for side in [4, 16, 48] {
        let rooms = grid(side);
        group.bench_with_input(BenchmarkId::new("sorted", side * side), &rooms, |b, rooms| {
            b.iter(|| black_box(Minimap::build(black_box(rooms), &TraversalOrder::Sorted)));
        });

        let bfs = TraversalOrder::BreadthFirst { start: name(side / 2, side / 2) };
        group.bench_with_input(BenchmarkId::new("breadth_first", side * side), &rooms, |b, rooms| {
            b.iter(|| black_box(Minimap::build(black_box(rooms), &bfs)));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let rooms = grid(16);
    let map = Minimap::build(&rooms, &TraversalOrder::Sorted);
    let here = name(8, 8);

    c.bench_function("scene_256", |b| {
        b.iter(|| black_box(Scene::build(black_box(&map), Some(&here))));
    });

    let Ok(scene) = Scene::build(&map, Some(&here)) else {
        return;
    };
    c.bench_function("ascii_256", |b| {
        b.iter(|| black_box(render_ascii(black_box(&scene), true)));
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
