//! Rendering helpers that turn a digit grid into a PNG-ready picture.

mod color;
mod paint;

pub use color::Color;
pub use paint::{
    BubbleOptions, DEFAULT_BORDER, DEFAULT_SCALE, MAX_SIDE, RenderError, add_border, colorize, magnify,
    render_bubble, scale_grid,
};
