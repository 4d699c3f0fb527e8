//! Core encoding pipeline: alphabet lookup, base-N digit codes, line
//! encoding, and grid composition.

pub mod alphabet;
pub mod digits;
pub mod error;
pub mod grid;
pub mod line;

pub use alphabet::Alphabet;
pub use digits::{from_digits, min_width_for, to_digits};
pub use error::EncodeError;
pub use grid::{
    DEFAULT_BASE, GAP, Grid, GridSpec, Orientation, compose_grid, decode_grid, pad_lines,
    paragraph_width,
};
pub use line::{CharacterCode, Line, encode_char, encode_line};
