//! Grid printing (`digitgrid encode`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use digitgrid::{DEFAULT_BASE, Grid, GridSpec, Orientation, compose_grid};
use serde::Serialize;
use tracing::info;

use crate::cli::common::{FormatArg, GridArgs, InputArgs};
use crate::cli::utils::{read_text_arg, resolve_alphabet, write_output};

/// Arguments for `digitgrid encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub grid: GridArgs,
    /// Insert a gap row/column between line blocks.
    #[arg(long)]
    pub separators: bool,
    /// Output format.
    #[arg(long, default_value_t = FormatArg::Text, value_enum)]
    pub format: FormatArg,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// JSON shape: `{ width, orientation, separators, base, rows, cols, cells }`
/// with `cells` in row-major order.
#[derive(Serialize)]
struct GridReport<'a> {
    width: usize,
    orientation: Orientation,
    separators: bool,
    #[serde(flatten)]
    grid: &'a Grid,
}

/// Execute `digitgrid encode`.
pub fn handle(args: EncodeArgs) -> Result<()> {
    let text = read_text_arg(args.input.text, args.input.from)?;
    let spec = GridSpec {
        base: args.grid.base.unwrap_or(DEFAULT_BASE),
        width: args.grid.width,
        alphabet: resolve_alphabet(args.grid.alphabet.as_deref())?,
        orientation: args.grid.orientation.map(Into::into).unwrap_or_default(),
        separators: args.separators,
    };
    let (grid, width) = compose_grid(&text, &spec).context("failed to encode text")?;
    info!(rows = grid.rows(), cols = grid.cols(), width, "encoded text");

    let output = match args.format {
        FormatArg::Text => grid.to_string(),
        FormatArg::Json => {
            let report = GridReport {
                width,
                orientation: spec.orientation,
                separators: spec.separators,
                grid: &grid,
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    match args.output {
        Some(path) => {
            write_output(&path, &output)?;
            if path.as_os_str() != "-" {
                println!(
                    "Wrote {}x{} grid ({} digits per symbol) to {}",
                    grid.rows(),
                    grid.cols(),
                    width,
                    path.display()
                );
            }
        }
        None => print!("{}", output),
    }
    Ok(())
}
