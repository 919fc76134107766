//! Play command implementation - Interactive TUI explorer.

// Canvas coordinates are small grid positions
#![allow(clippy::cast_precision_loss)]

use super::{CliError, OrderArg};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dork::minimap::{Scene, Surface};
use dork::{Direction, Game, GameConfig};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as Split, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use serde_yaml::Value;
use std::convert::Infallible;
use std::io::stdout;
use std::path::Path;
use std::time::Duration;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the world cannot be loaded or the TUI fails.
pub(crate) fn execute(world: &Path, order: OrderArg) -> Result<(), CliError> {
    let config = GameConfig {
        order: order.into(),
        ..GameConfig::default()
    };
    let game = Game::load(world, config)?;
    run_tui(game)
}

/// Keeps the latest frame for the next terminal draw.
#[derive(Debug, Default)]
struct TerminalSurface {
    scene: Option<Scene>,
}

impl Surface for TerminalSurface {
    type Error = Infallible;

    fn draw(&mut self, scene: &Scene) -> Result<(), Infallible> {
        self.scene = Some(scene.clone());
        Ok(())
    }
}

/// App state for the TUI.
struct App {
    game: Game,
    surface: TerminalSurface,
    status: String,
    render_error: Option<String>,
}

impl App {
    fn new(game: Game) -> Self {
        let mut app = Self {
            game,
            surface: TerminalSurface::default(),
            status: String::new(),
            render_error: None,
        };
        app.redraw();
        app.status = app
            .game
            .location()
            .map_or_else(|| "You are nowhere.".to_string(), |here| format!("You are in {here}."));
        app
    }

    fn redraw(&mut self) {
        self.render_error = match self.game.update(&mut self.surface) {
            Ok(()) => None,
            Err(e) => {
                self.surface.scene = None;
                Some(e.to_string())
            }
        };
    }

    fn go(&mut self, direction: Direction) {
        self.status = match self.game.move_player(direction) {
            Ok(room) => format!("You go {direction} to {room}."),
            Err(e) => format!("You can't: {e}."),
        };
        self.redraw();
    }
}

fn run_tui(game: Game) -> Result<(), CliError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(game);

    loop {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up | KeyCode::Char('w' | 'k') => app.go(Direction::Up),
                KeyCode::Down | KeyCode::Char('s' | 'j') => app.go(Direction::Down),
                KeyCode::Left | KeyCode::Char('a' | 'h') => app.go(Direction::Left),
                KeyCode::Right | KeyCode::Char('d' | 'l') => app.go(Direction::Right),
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Split::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Split::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], app);
    render_room(f, main_chunks[1], app);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(format!(" Dork | {} ", app.status))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Minimap ");

    let Some(scene) = &app.surface.scene else {
        let message = app
            .render_error
            .clone()
            .unwrap_or_else(|| "Nothing to draw.".to_string());
        let panel = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(panel, area);
        return;
    };

    // One unit of margin keeps labels of edge rooms inside the block.
    let x_max = scene.width.saturating_sub(1) as f64;
    let y_max = scene.height.saturating_sub(1) as f64;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-0.5, x_max + 0.5])
        .y_bounds([-0.5, y_max + 0.5])
        .paint(|ctx| {
            for (a, b) in scene.edge_nodes() {
                ctx.draw(&Segment {
                    x1: a.position.x as f64,
                    y1: a.position.y as f64,
                    x2: b.position.x as f64,
                    y2: b.position.y as f64,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();

            for node in &scene.nodes {
                let x = node.position.x as f64;
                let y = node.position.y as f64;
                let color = if node.highlighted {
                    Color::Red
                } else {
                    Color::White
                };
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });

                let mut style = Style::default().fg(color);
                if node.highlighted {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ctx.print(x, y + 0.2, Span::styled(node.label.clone(), style));
            }
        });

    f.render_widget(canvas, area);
}

fn render_room(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    match (app.game.location(), app.game.current_room()) {
        (Some(here), Some(room)) => {
            lines.push(Line::from(Span::styled(
                here.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            if let Some(messages) = &room.messages {
                for text in message_lines(messages) {
                    lines.push(Line::from(text));
                }
                lines.push(Line::from(""));
            }
            lines.push(Line::from("Exits:"));
            for (direction, target) in room.grid_exits() {
                lines.push(Line::from(format!("  {direction}: {target}")));
            }
        }
        (Some(here), None) => lines.push(Line::from(format!("{here} is not a room."))),
        (None, _) => lines.push(Line::from("The player has no location.")),
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Room "))
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}

/// Flatten free-form room messages into display lines.
fn message_lines(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Sequence(items) => items.iter().flat_map(message_lines).collect(),
        Value::Mapping(entries) => entries
            .iter()
            .flat_map(|(key, value)| {
                let key = key.as_str().unwrap_or_default().to_string();
                message_lines(value)
                    .into_iter()
                    .map(move |text| format!("{key}: {text}"))
            })
            .collect(),
        other => serde_yaml::to_string(other)
            .map(|s| vec![s.trim_end().to_string()])
            .unwrap_or_default(),
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(" [q] Quit  [←↑↓→ / wasd / hjkl] Move ")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
