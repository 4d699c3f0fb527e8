//! Command-line interface wiring for the `digitgrid` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! one submodule per command.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

pub mod common;
pub mod encode;
pub mod render;
pub mod utils;
pub mod width;

/// Parsed CLI entrypoint for the `digitgrid` binary.
#[derive(Parser, Debug)]
#[command(
    name = "digitgrid",
    version,
    about = "Encode text as base-N digit grids and paint them"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the digit grid for some text.
    Encode(encode::EncodeArgs),
    /// Paint text as a colorized, magnified PNG.
    Render(render::RenderArgs),
    /// Report the digit width an alphabet needs in a given base.
    Width(width::WidthArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode(args) => encode::handle(args),
        Command::Render(args) => render::handle(args),
        Command::Width(args) => width::handle(args),
    }
}
