use image::imageops::{FilterType, overlay, resize};
use image::{GrayImage, Luma, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{Alphabet, DEFAULT_BASE, EncodeError, Grid, GridSpec, Orientation, compose_grid};
use crate::render::color::Color;

pub const DEFAULT_SCALE: u32 = 10;
pub const DEFAULT_BORDER: u32 = 1;
/// Largest output side, in pixels, that framing or magnifying may produce.
pub const MAX_SIDE: u32 = 1 << 16;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("cannot render an empty grid")]
    EmptyGrid,
    #[error("border or magnification must keep each side between 1 and {MAX_SIDE} pixels")]
    InvalidScale,
    #[error("unrecognised color '{0}' (use a name, #rrggbb, or r,g,b)")]
    InvalidColor(String),
}

/// Options for the full text-to-picture pipeline.
///
/// Every field has a default, so a JSON config only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BubbleOptions {
    pub base: u32,
    pub width: Option<usize>,
    /// Custom alphabet, in index order. Defaults to codepoints 32..=122.
    pub alphabet: Option<String>,
    pub orientation: Orientation,
    pub separators: bool,
    pub foreground: Color,
    pub background: Color,
    /// Border thickness in grid cells, before magnification.
    pub border: u32,
    /// Nearest-neighbour magnification factor.
    pub scale: u32,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            width: None,
            alphabet: None,
            orientation: Orientation::Vertical,
            separators: true,
            foreground: Color::WHITE,
            background: Color::BLACK,
            border: DEFAULT_BORDER,
            scale: DEFAULT_SCALE,
        }
    }
}

impl BubbleOptions {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn grid_spec(&self) -> Result<GridSpec, EncodeError> {
        let alphabet = match &self.alphabet {
            Some(symbols) => symbols.parse::<Alphabet>()?,
            None => Alphabet::default(),
        };
        Ok(GridSpec {
            base: self.base,
            width: self.width,
            alphabet,
            orientation: self.orientation,
            separators: self.separators,
        })
    }
}

/// One gray pixel per cell; digit `d` maps to `d * 255 / (base - 1)`.
pub fn scale_grid(grid: &Grid) -> Result<GrayImage, RenderError> {
    if grid.is_empty() {
        return Err(RenderError::EmptyGrid);
    }
    let width = u32::try_from(grid.cols()).map_err(|_| RenderError::InvalidScale)?;
    let height = u32::try_from(grid.rows()).map_err(|_| RenderError::InvalidScale)?;
    let top = grid.base() - 1;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let digit = grid.get(y as usize, x as usize).unwrap_or(0);
        // digit < base, so the quotient never exceeds 255
        Luma([(u32::from(digit) * 255 / top) as u8])
    }))
}

/// Map black to `background` and white to `foreground`, interpolating linearly.
pub fn colorize(gray: &GrayImage, background: Color, foreground: Color) -> RgbImage {
    let lerp = |lo: u8, hi: u8, level: u8| -> u8 {
        let (lo, hi, level) = (i32::from(lo), i32::from(hi), i32::from(level));
        (lo + (hi - lo) * level / 255) as u8
    };
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let Luma([level]) = *gray.get_pixel(x, y);
        image::Rgb([
            lerp(background.r, foreground.r, level),
            lerp(background.g, foreground.g, level),
            lerp(background.b, foreground.b, level),
        ])
    })
}

/// The computed side, or `InvalidScale` when it overflowed or leaves `1..=MAX_SIDE`.
fn bounded_side(side: Option<u32>) -> Result<u32, RenderError> {
    side.filter(|s| (1..=MAX_SIDE).contains(s))
        .ok_or(RenderError::InvalidScale)
}

/// Surround `img` with a solid frame `width` pixels thick.
pub fn add_border(img: &RgbImage, color: Color, width: u32) -> Result<RgbImage, RenderError> {
    if width == 0 {
        return Ok(img.clone());
    }
    let both = width.checked_mul(2);
    let outer_w = bounded_side(both.and_then(|b| img.width().checked_add(b)))?;
    let outer_h = bounded_side(both.and_then(|b| img.height().checked_add(b)))?;
    let mut canvas = RgbImage::new(outer_w, outer_h);
    overlay(&mut canvas, img, i64::from(width), i64::from(width));
    for ring in 0..width {
        // outer sides are at most MAX_SIDE, so ring fits in i32
        let offset = ring as i32;
        let rect = Rect::at(offset, offset).of_size(outer_w - 2 * ring, outer_h - 2 * ring);
        draw_hollow_rect_mut(&mut canvas, rect, color.to_rgb());
    }
    Ok(canvas)
}

/// Enlarge by an integer factor with nearest-neighbour sampling.
pub fn magnify(img: &RgbImage, factor: u32) -> Result<RgbImage, RenderError> {
    if factor == 0 {
        return Err(RenderError::InvalidScale);
    }
    let w = bounded_side(img.width().checked_mul(factor))?;
    let h = bounded_side(img.height().checked_mul(factor))?;
    Ok(resize(img, w, h, FilterType::Nearest))
}

/// Encode `text` and paint it: scale, colorize, frame, magnify.
pub fn render_bubble(text: &str, options: &BubbleOptions) -> Result<RgbImage, RenderError> {
    let spec = options.grid_spec()?;
    let (grid, width) = compose_grid(text, &spec)?;
    let gray = scale_grid(&grid)?;
    let colored = colorize(&gray, options.background, options.foreground);
    let framed = add_border(&colored, options.background, options.border)?;
    let image = magnify(&framed, options.scale)?;
    debug!(
        digit_width = width,
        grid_rows = grid.rows(),
        grid_cols = grid.cols(),
        px_width = image.width(),
        px_height = image.height(),
        "rendered bubble"
    );
    Ok(image)
}
