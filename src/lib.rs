//! Encode text as fixed-width base-N digit codes laid out on a 2-D grid,
//! and paint those grids as pictures.

pub mod core;
pub mod render;

pub use crate::core::{
    Alphabet, CharacterCode, DEFAULT_BASE, EncodeError, GAP, Grid, GridSpec, Line, Orientation,
    compose_grid, decode_grid, encode_char, encode_line, from_digits, min_width_for, to_digits,
};
pub use crate::render::{BubbleOptions, Color, RenderError, render_bubble};
