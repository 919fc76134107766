//! Dork CLI - validate worlds, print minimaps, and walk around.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Dork - a text adventure world with a minimap
#[derive(Parser, Debug)]
#[command(name = "dork")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a world file for missing keys and broken references
    Validate {
        /// World file (default: dork.yml)
        world: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,

        /// Only print warnings and errors
        #[arg(short, long)]
        quiet: bool,

        /// Exit with failure if any reference is broken
        #[arg(long)]
        strict: bool,
    },

    /// Print the minimap
    Map {
        /// World file (default: dork.yml)
        world: Option<PathBuf>,

        /// Highlight this room instead of the player's
        #[arg(short, long)]
        at: Option<String>,

        /// Room order for the layout
        #[arg(short, long, default_value = "sorted")]
        order: cli::OrderArg,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::MapFormat,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Load a world and write it back out as a snapshot
    Save {
        /// World file (default: dork.yml)
        world: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Snapshot format: yaml or json
        #[arg(short, long, default_value = "yaml")]
        format: cli::SaveFormat,
    },

    /// Interactive TUI: walk between rooms and watch the minimap
    Play {
        /// World file (default: dork.yml)
        world: Option<PathBuf>,

        /// Room order for the layout
        #[arg(short, long, default_value = "sorted")]
        order: cli::OrderArg,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dork=debug" } else { "dork=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Validate {
            world,
            format,
            quiet,
            strict,
        } => cli::validate::execute(&cli::world_path(world), format, quiet, strict),

        Commands::Map {
            world,
            at,
            order,
            format,
            no_color,
        } => cli::map::execute(
            &cli::world_path(world),
            at.as_deref(),
            order,
            format,
            !no_color,
        ),

        Commands::Save {
            world,
            output,
            format,
        } => cli::save::execute(&cli::world_path(world), output.as_deref(), format),

        Commands::Play { world, order } => cli::play::execute(&cli::world_path(world), order),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
