//! World validation command implementation.

use super::output::{format_report, JsonReport};
use super::{CliError, ReportFormat};
use dork::world::{read_value, validate, REQUIRED_SECTIONS};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the world cannot be read, has the wrong structure,
/// or (with `strict`) has broken references.
pub(crate) fn execute(
    world: &Path,
    format: ReportFormat,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let document = read_value(world)?;

    if format == ReportFormat::Text {
        println!("Validating: {}", world.display());
        println!();
    }

    let report = match validate(&document) {
        Ok(report) => {
            if format == ReportFormat::Text {
                for section in REQUIRED_SECTIONS {
                    print_check(section, true);
                }
                println!();
            }
            report
        }
        Err(e) => {
            if format == ReportFormat::Text {
                print_check("structure", false);
            }
            return Err(e.into());
        }
    };

    match format {
        ReportFormat::Text => {
            print!("{}", format_report(&report, quiet));
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonReport::from_report(&report, quiet))?;
            println!("{json}");
        }
    }

    if strict && report.has_errors() {
        return Err(CliError::new("World has broken references"));
    }

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
