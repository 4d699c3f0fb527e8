//! Image rendering (`digitgrid render`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use digitgrid::{BubbleOptions, Color, render_bubble};
use tracing::info;

use crate::cli::common::{GridArgs, InputArgs};
use crate::cli::utils::{ensure_parent_dir, read_text_arg};

/// Arguments for `digitgrid render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub grid: GridArgs,
    /// Output PNG path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// JSON file with render options; flags given here override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Leave out the gap rows/columns between line blocks.
    #[arg(long)]
    pub no_separators: bool,
    /// Color for the highest digit (name, #rrggbb, or r,g,b).
    #[arg(long = "fg")]
    pub foreground: Option<Color>,
    /// Color for digit zero and the border.
    #[arg(long = "bg")]
    pub background: Option<Color>,
    /// Border thickness in cells.
    #[arg(long)]
    pub border: Option<u32>,
    /// Pixels per cell.
    #[arg(long)]
    pub scale: Option<u32>,
}

/// Execute `digitgrid render`.
pub fn handle(args: RenderArgs) -> Result<()> {
    let text = read_text_arg(args.input.text.clone(), args.input.from.clone())?;
    let options = resolve_options(&args)?;
    let image = render_bubble(&text, &options).context("failed to render text")?;

    ensure_parent_dir(&args.output)?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "saved image");
    println!(
        "Rendered {}x{} image to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn resolve_options(args: &RenderArgs) -> Result<BubbleOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            BubbleOptions::from_json(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => BubbleOptions::default(),
    };

    if let Some(base) = args.grid.base {
        options.base = base;
    }
    if args.grid.width.is_some() {
        options.width = args.grid.width;
    }
    if args.grid.alphabet.is_some() {
        options.alphabet = args.grid.alphabet.clone();
    }
    if let Some(orientation) = args.grid.orientation {
        options.orientation = orientation.into();
    }
    if args.no_separators {
        options.separators = false;
    }
    if let Some(fg) = args.foreground {
        options.foreground = fg;
    }
    if let Some(bg) = args.background {
        options.background = bg;
    }
    if let Some(border) = args.border {
        options.border = border;
    }
    if let Some(scale) = args.scale {
        options.scale = scale;
    }
    Ok(options)
}
