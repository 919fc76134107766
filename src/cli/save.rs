//! Save command implementation.

use super::{CliError, SaveFormat};
use dork::{Game, GameConfig};
use std::path::Path;

/// Execute the save command.
///
/// # Errors
///
/// Returns an error if the world cannot be loaded or the snapshot cannot be
/// written.
pub(crate) fn execute(
    world: &Path,
    output: Option<&Path>,
    format: SaveFormat,
) -> Result<(), CliError> {
    let game = Game::load(world, GameConfig::default())?;
    let snapshot = game.save();

    match output {
        Some(path) => {
            snapshot.save_path(path, format.into())?;
            eprintln!("Saved to {}", path.display());
        }
        None => print!("{}", snapshot.encode(format.into())?),
    }

    Ok(())
}
