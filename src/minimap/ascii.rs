//! ASCII minimap renderer with optional ANSI colors.

use std::convert::Infallible;

use crate::minimap::{Scene, Surface};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";

/// Marker for a room.
const ROOM: char = 'o';
/// Marker for the player's room.
const PLAYER: char = '@';

/// Text lines per grid row: label, marker, vertical connectors.
const ROW_LINES: usize = 3;

/// Render a scene as text.
///
/// Output format:
/// ```text
///    Attic
///      o
///      |
///    Hall   Study
///      @------o
///
/// Legend: o=Room  @=You (Hall)
/// ```
///
/// Only edges between neighbouring cells are drawn. Longer edges only occur
/// when rooms conflict and have no sensible straight-line rendering.
#[must_use]
pub fn render_ascii(scene: &Scene, color: bool) -> String {
    let label_width = scene
        .nodes
        .iter()
        .map(|n| n.label.chars().count())
        .max()
        .unwrap_or(1);
    let cell_width = label_width + 2;
    let columns = scene.width * cell_width;
    let lines = (scene.height * ROW_LINES).saturating_sub(1);

    let mut canvas = Canvas::new(columns, lines);
    let row_of = |plot_y: usize| scene.height.saturating_sub(1).saturating_sub(plot_y);
    let marker_col = |x: usize| x * cell_width + cell_width / 2;

    for (a, b) in scene.edge_nodes() {
        let (ra, rb) = (row_of(a.position.y), row_of(b.position.y));
        let (ca, cb) = (a.position.x, b.position.x);
        if ra == rb && ca.abs_diff(cb) == 1 {
            let line = ra * ROW_LINES + 1;
            for col in marker_col(ca.min(cb)) + 1..marker_col(ca.max(cb)) {
                canvas.put(line, col, '-', false);
            }
        } else if ca == cb && ra.abs_diff(rb) == 1 {
            canvas.put(ra.min(rb) * ROW_LINES + 2, marker_col(ca), '|', false);
        }
    }

    for node in &scene.nodes {
        let row = row_of(node.position.y);
        let centre = marker_col(node.position.x);
        let marker = if node.highlighted { PLAYER } else { ROOM };
        canvas.put(row * ROW_LINES + 1, centre, marker, node.highlighted);

        let len = node.label.chars().count();
        let start = centre.saturating_sub(len / 2);
        for (i, ch) in node.label.chars().enumerate() {
            canvas.put(row * ROW_LINES, start + i, ch, node.highlighted);
        }
    }

    let mut output = canvas.finish(color);
    output.push('\n');
    match scene.highlighted() {
        Some(node) => output.push_str(&format!("Legend: {ROOM}=Room  {PLAYER}=You ({})\n", node.label)),
        None => output.push_str(&format!("Legend: {ROOM}=Room\n")),
    }
    output
}

/// Character grid with a highlight flag per cell.
struct Canvas {
    columns: usize,
    cells: Vec<Vec<(char, bool)>>,
}

impl Canvas {
    fn new(columns: usize, lines: usize) -> Self {
        Self {
            columns,
            cells: vec![vec![(' ', false); columns]; lines],
        }
    }

    fn put(&mut self, line: usize, col: usize, ch: char, highlighted: bool) {
        if col >= self.columns {
            return;
        }
        if let Some(cell) = self.cells.get_mut(line).and_then(|l| l.get_mut(col)) {
            *cell = (ch, highlighted);
        }
    }

    fn finish(self, color: bool) -> String {
        let mut output = String::new();
        for line in self.cells {
            let end = line
                .iter()
                .rposition(|(ch, _)| *ch != ' ')
                .map_or(0, |i| i + 1);
            let mut lit = false;
            for &(ch, highlighted) in &line[..end] {
                if color && highlighted != lit {
                    output.push_str(if highlighted { BOLD } else { RESET });
                    if highlighted {
                        output.push_str(RED);
                    }
                    lit = highlighted;
                }
                output.push(ch);
            }
            if lit {
                output.push_str(RESET);
            }
            output.push('\n');
        }
        output
    }
}

/// A surface that renders into a string.
#[derive(Debug, Clone, Default)]
pub struct AsciiSurface {
    color: bool,
    output: String,
}

impl AsciiSurface {
    /// Create a surface, with or without ANSI colors.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            output: String::new(),
        }
    }

    /// The last frame drawn.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the last frame drawn.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

impl Surface for AsciiSurface {
    type Error = Infallible;

    fn draw(&mut self, scene: &Scene) -> Result<(), Infallible> {
        self.output = render_ascii(scene, self.color);
        Ok(())
    }
}
