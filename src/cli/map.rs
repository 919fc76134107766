//! Map command implementation.

use super::output::{format_conflicts, JsonMap};
use super::{CliError, MapFormat, OrderArg};
use dork::minimap::AsciiSurface;
use dork::{Game, GameConfig};
use std::path::Path;

/// Execute the map command.
///
/// # Errors
///
/// Returns an error if the world cannot be loaded or, for text output, the
/// minimap cannot be drawn for the chosen room.
pub(crate) fn execute(
    world: &Path,
    at: Option<&str>,
    order: OrderArg,
    format: MapFormat,
    color: bool,
) -> Result<(), CliError> {
    let config = GameConfig {
        order: order.into(),
        color,
    };

    let mut game = Game::load(world, config)?;
    if let Some(room) = at {
        game.player.move_to(room);
        game.relayout();
    }

    match format {
        MapFormat::Text => {
            let mut surface = AsciiSurface::new(game.config().color);
            game.update(&mut surface)?;
            print!("{}", surface.output());

            let conflicts = format_conflicts(game.minimap());
            if !conflicts.is_empty() {
                eprintln!();
                eprint!("{conflicts}");
            }
        }
        MapFormat::Json => {
            let map = JsonMap {
                location: game.location(),
                minimap: game.minimap(),
                scene: game.scene().ok(),
            };
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    Ok(())
}
