//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use digitgrid::Alphabet;

/// Resolve plain-text input for commands that accept either inline strings or files.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    if let Some(path) = from {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    read_stdin()
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Build the alphabet named on the command line, or the default one.
pub fn resolve_alphabet(symbols: Option<&str>) -> Result<Alphabet> {
    match symbols {
        Some(s) => s.parse::<Alphabet>().context("invalid --alphabet"),
        None => Ok(Alphabet::default()),
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}
