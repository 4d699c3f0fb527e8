//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use digitgrid::Orientation;

/// Orientation flag accepted by grid-producing commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OrientationArg {
    Vertical,
    Horizontal,
}

impl From<OrientationArg> for Orientation {
    fn from(value: OrientationArg) -> Orientation {
        match value {
            OrientationArg::Vertical => Orientation::Vertical,
            OrientationArg::Horizontal => Orientation::Horizontal,
        }
    }
}

/// Output formats for `digitgrid encode`.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Text,
    Json,
}

/// Where the text to encode comes from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
}

/// Encoding parameters shared by `encode` and `render`.
///
/// Unset values fall back to the command's defaults (or, for `render`, to
/// its `--config` file).
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Numeral base, 2 through 256.
    #[arg(long, short = 'b')]
    pub base: Option<u32>,
    /// Digits per symbol (inferred from the text when omitted).
    #[arg(long, short = 'w')]
    pub width: Option<usize>,
    /// Custom alphabet in index order (defaults to codepoints 32..=122).
    #[arg(long)]
    pub alphabet: Option<String>,
    /// Axis each character's digits run along.
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,
}
