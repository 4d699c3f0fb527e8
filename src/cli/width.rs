//! Alphabet sizing (`digitgrid width`).

use anyhow::Result;
use clap::Args;
use digitgrid::{DEFAULT_BASE, min_width_for};

use crate::cli::utils::resolve_alphabet;

/// Arguments for `digitgrid width`.
#[derive(Args, Debug)]
pub struct WidthArgs {
    /// Numeral base, 2 through 256.
    #[arg(long, short = 'b', default_value_t = DEFAULT_BASE)]
    pub base: u32,
    /// Custom alphabet in index order (defaults to codepoints 32..=122).
    #[arg(long)]
    pub alphabet: Option<String>,
}

/// Execute `digitgrid width`.
pub fn handle(args: WidthArgs) -> Result<()> {
    let alphabet = resolve_alphabet(args.alphabet.as_deref())?;
    let width = min_width_for((alphabet.len() - 1) as u64, args.base)?;
    println!(
        "{} symbols need {} base-{} digits each",
        alphabet.len(),
        width,
        args.base
    );
    Ok(())
}
