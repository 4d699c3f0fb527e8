use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::alphabet::Alphabet;
use crate::core::digits::{check_base, check_width, from_digits, min_width_for};
use crate::core::error::EncodeError;
use crate::core::line::{Line, encode_line};

/// Digit value written into separator rows and columns.
pub const GAP: u8 = 0;
pub const DEFAULT_BASE: u32 = 5;

/// Axis along which a character's digit sequence runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Each code is a column; lines stack top to bottom.
    #[default]
    Vertical,
    /// Each code is a row; lines sit side by side.
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Parameters for [`compose_grid`].
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub base: u32,
    /// Digits per symbol; inferred from the whole paragraph when `None`.
    pub width: Option<usize>,
    pub alphabet: Alphabet,
    pub orientation: Orientation,
    pub separators: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            width: None,
            alphabet: Alphabet::default(),
            orientation: Orientation::Vertical,
            separators: false,
        }
    }
}

/// Row-major 2-D array of digits in `[0, base)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    base: u32,
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    fn zeroed(base: u32, rows: usize, cols: usize) -> Self {
        Self {
            base,
            rows,
            cols,
            cells: vec![GAP; rows * cols],
        }
    }

    /// Build a grid from explicit rows, validating shape and digit range.
    pub fn from_rows(base: u32, rows: Vec<Vec<u8>>) -> Result<Self, EncodeError> {
        check_base(base)?;
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(EncodeError::InvalidGrid("rows differ in length".to_string()));
        }
        if let Some(&d) = rows.iter().flatten().find(|&&d| u32::from(d) >= base) {
            return Err(EncodeError::InvalidGrid(format!(
                "digit {d} out of range for base {base}"
            )));
        }
        Ok(Self {
            base,
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row < self.rows {
            Some(&self.cells[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .filter_map(|r| self.row(r).map(<[u8]>::to_vec))
            .collect()
    }

    fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.cells[row * self.cols + col] = digit;
    }

    /// Insert one gap row (vertical) or column (horizontal) between each
    /// `width`-sized section of the digit axis. No trailing gap.
    fn with_separators(&self, width: usize, orientation: Orientation) -> Grid {
        let (rows, cols) = match orientation {
            Orientation::Vertical => (with_gaps(self.rows, width), self.cols),
            Orientation::Horizontal => (self.rows, with_gaps(self.cols, width)),
        };
        let mut out = Grid::zeroed(self.base, rows, cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let (r2, c2) = match orientation {
                    Orientation::Vertical => (r + r / width, c),
                    Orientation::Horizontal => (r, c + c / width),
                };
                out.set(r2, c2, self.cells[r * self.cols + c]);
            }
        }
        out
    }

    /// Remove every `(width + 1)`-th row or column, undoing separator insertion.
    pub fn strip_separators(&self, width: usize, orientation: Orientation) -> Grid {
        let is_gap = |i: usize| (i + 1) % (width + 1) == 0;
        let keep_rows: Vec<usize> = (0..self.rows)
            .filter(|&r| orientation == Orientation::Horizontal || !is_gap(r))
            .collect();
        let keep_cols: Vec<usize> = (0..self.cols)
            .filter(|&c| orientation == Orientation::Vertical || !is_gap(c))
            .collect();
        let cells = keep_rows
            .iter()
            .flat_map(|&r| keep_cols.iter().map(move |&c| (r, c)))
            .map(|(r, c)| self.cells[r * self.cols + c])
            .collect();
        Grid {
            base: self.base,
            rows: keep_rows.len(),
            cols: keep_cols.len(),
            cells,
        }
    }
}

fn with_gaps(len: usize, width: usize) -> usize {
    let sections = len / width;
    len + sections.saturating_sub(1)
}

impl fmt::Display for Grid {
    /// One grid row per text line; digits run together up to base 10.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = (self.base - 1).to_string().len();
        for r in 0..self.rows {
            let row = self.row(r).unwrap_or_default();
            if self.base <= 10 {
                for d in row {
                    write!(f, "{d}")?;
                }
            } else {
                let cells: Vec<String> = row.iter().map(|d| format!("{d:>pad$}")).collect();
                write!(f, "{}", cells.join(" "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Pad every line on the right with the alphabet's blank symbol to the
/// length of the longest line.
pub fn pad_lines(text: &str, alphabet: &Alphabet) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let max_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let blank = alphabet.blank();
    lines
        .into_iter()
        .map(|line| {
            let mut padded = line.to_string();
            padded.extend(std::iter::repeat_n(blank, max_len - line.chars().count()));
            padded
        })
        .collect()
}

/// Width needed for the largest alphabet index used anywhere in `lines`.
pub fn paragraph_width<S: AsRef<str>>(
    lines: &[S],
    base: u32,
    alphabet: &Alphabet,
) -> Result<usize, EncodeError> {
    let mut max_index = 0usize;
    for line in lines {
        for ch in line.as_ref().chars() {
            max_index = max_index.max(alphabet.index_of(ch)?);
        }
    }
    min_width_for(max_index as u64, base)
}

/// Encode a paragraph into a digit grid.
///
/// Returns the grid together with the digit width used for every symbol.
/// When `spec.width` is `None` the width is computed once from the whole
/// padded paragraph and then passed to every line.
pub fn compose_grid(text: &str, spec: &GridSpec) -> Result<(Grid, usize), EncodeError> {
    check_base(spec.base)?;
    if let Some(width) = spec.width {
        check_width(width)?;
    }

    let padded = pad_lines(text, &spec.alphabet);
    if padded.is_empty() {
        return Err(EncodeError::EmptyInput);
    }

    let width = match spec.width {
        Some(width) => width,
        None => paragraph_width(&padded, spec.base, &spec.alphabet)?,
    };

    let lines = padded
        .iter()
        .map(|line| encode_line(line, spec.base, width, &spec.alphabet))
        .collect::<Result<Vec<_>, _>>()?;

    let mut grid = layout(&lines, spec.base, width, spec.orientation);
    if spec.separators {
        grid = grid.with_separators(width, spec.orientation);
    }

    debug!(
        base = spec.base,
        width,
        lines = lines.len(),
        orientation = %spec.orientation,
        separators = spec.separators,
        rows = grid.rows(),
        cols = grid.cols(),
        "composed digit grid"
    );
    Ok((grid, width))
}

/// Place every code of every line; lines are assumed equally long.
fn layout(lines: &[Line], base: u32, width: usize, orientation: Orientation) -> Grid {
    let line_len = lines.first().map_or(0, Line::len);
    let depth = lines.len() * width;
    let mut grid = match orientation {
        Orientation::Vertical => Grid::zeroed(base, depth, line_len),
        Orientation::Horizontal => Grid::zeroed(base, line_len, depth),
    };
    for (l, line) in lines.iter().enumerate() {
        for (c, code) in line.codes().iter().enumerate() {
            for (d, &digit) in code.digits().iter().enumerate() {
                let along = l * width + d;
                match orientation {
                    Orientation::Vertical => grid.set(along, c, digit),
                    Orientation::Horizontal => grid.set(c, along, digit),
                }
            }
        }
    }
    grid
}

/// Read a grid produced by [`compose_grid`] back into its padded lines.
pub fn decode_grid(grid: &Grid, spec: &GridSpec, width: usize) -> Result<Vec<String>, EncodeError> {
    check_width(width)?;
    let grid = if spec.separators {
        grid.strip_separators(width, spec.orientation)
    } else {
        grid.clone()
    };
    let (depth, line_len) = match spec.orientation {
        Orientation::Vertical => (grid.rows(), grid.cols()),
        Orientation::Horizontal => (grid.cols(), grid.rows()),
    };
    if depth % width != 0 {
        return Err(EncodeError::InvalidGrid(format!(
            "digit axis of {depth} is not a multiple of width {width}"
        )));
    }

    let mut lines = Vec::with_capacity(depth / width);
    let mut code = vec![0u8; width];
    for l in 0..depth / width {
        let mut text = String::with_capacity(line_len);
        for c in 0..line_len {
            for (d, slot) in code.iter_mut().enumerate() {
                let along = l * width + d;
                *slot = match spec.orientation {
                    Orientation::Vertical => grid.cells[along * grid.cols + c],
                    Orientation::Horizontal => grid.cells[c * grid.cols + along],
                };
            }
            let index = from_digits(&code, grid.base()).ok_or_else(|| {
                EncodeError::InvalidGrid(format!(
                    "code for line {l}, position {c} overflows a 64-bit index"
                ))
            })?;
            let symbol = usize::try_from(index)
                .ok()
                .and_then(|i| spec.alphabet.symbol_at(i))
                .ok_or(EncodeError::IndexOutOfRange {
                    index,
                    len: spec.alphabet.len(),
                })?;
            text.push(symbol);
        }
        lines.push(text);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lower_spec(orientation: Orientation, separators: bool) -> GridSpec {
        GridSpec {
            base: 2,
            width: None,
            alphabet: " abcdefghijklmnopqrstuvwxyz/".parse::<Alphabet>().unwrap(),
            orientation,
            separators,
        }
    }

    #[test]
    fn single_line_shapes_are_transposed() {
        let text = "hello world";
        let (v, w) = compose_grid(text, &lower_spec(Orientation::Vertical, false)).unwrap();
        let (h, _) = compose_grid(text, &lower_spec(Orientation::Horizontal, false)).unwrap();
        assert_eq!(w, 5);
        assert_eq!(v.shape(), (5, 11));
        assert_eq!(h.shape(), (11, 5));
        for r in 0..5 {
            for c in 0..11 {
                assert_eq!(v.get(r, c), h.get(c, r));
            }
        }
    }

    #[test]
    fn single_line_ignores_separators() {
        let spec = lower_spec(Orientation::Vertical, true);
        let (grid, width) = compose_grid("ab", &spec).unwrap();
        assert_eq!((width, grid.shape()), (2, (2, 2)));
    }

    #[test]
    fn vertical_columns_hold_codes() {
        let spec = GridSpec {
            width: Some(5),
            ..lower_spec(Orientation::Vertical, false)
        };
        let (grid, width) = compose_grid("ab", &spec).unwrap();
        assert_eq!(width, 5);
        assert_eq!(
            grid.to_rows(),
            vec![vec![0, 0], vec![0, 0], vec![0, 0], vec![0, 1], vec![1, 0]]
        );
    }

    #[test]
    fn multi_line_vertical_pads_and_stacks() {
        let (grid, width) =
            compose_grid("ab\nb", &lower_spec(Orientation::Vertical, false)).unwrap();
        assert_eq!(width, 2);
        assert_eq!(
            grid.to_rows(),
            vec![vec![0, 1], vec![1, 0], vec![1, 0], vec![0, 0]]
        );
    }

    #[test]
    fn multi_line_horizontal_sits_side_by_side() {
        let (grid, _) = compose_grid("ab\nb", &lower_spec(Orientation::Horizontal, false)).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 1, 1, 0], vec![1, 0, 0, 0]]);
    }

    #[test]
    fn separators_go_between_line_blocks() {
        let (v, _) = compose_grid("ab\nb", &lower_spec(Orientation::Vertical, true)).unwrap();
        assert_eq!(
            v.to_rows(),
            vec![vec![0, 1], vec![1, 0], vec![0, 0], vec![1, 0], vec![0, 0]]
        );
        let (h, _) = compose_grid("ab\nb", &lower_spec(Orientation::Horizontal, true)).unwrap();
        assert_eq!(h.to_rows(), vec![vec![0, 1, 0, 1, 0], vec![1, 0, 0, 0, 0]]);
    }

    #[test]
    fn stripping_separators_restores_grid() {
        let text = "the quick\nbrown fox\njumps/over";
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let (plain, width) = compose_grid(text, &lower_spec(orientation, false)).unwrap();
            let (spaced, _) = compose_grid(text, &lower_spec(orientation, true)).unwrap();
            match orientation {
                Orientation::Vertical => assert_eq!(spaced.rows(), plain.rows() + 2),
                Orientation::Horizontal => assert_eq!(spaced.cols(), plain.cols() + 2),
            }
            assert_eq!(spaced.strip_separators(width, orientation), plain);
        }
    }

    #[test]
    fn line_count_scales_digit_axis() {
        let spec = GridSpec::default();
        let (grid, width) = compose_grid("Hi\nthere\n!", &spec).unwrap();
        assert_eq!(width, 3);
        assert_eq!(grid.shape(), (3 * width, 5));
    }

    #[test]
    fn width_is_paragraph_wide() {
        // "z" alone needs 5 binary digits; the short first line must use them too
        let (grid, width) = compose_grid("a\nz", &lower_spec(Orientation::Vertical, false)).unwrap();
        assert_eq!(width, 5);
        assert_eq!(grid.shape(), (10, 1));
    }

    #[test]
    fn explicit_width_is_honoured_or_rejected() {
        let mut spec = lower_spec(Orientation::Vertical, false);
        spec.width = Some(8);
        let (grid, width) = compose_grid("ab", &spec).unwrap();
        assert_eq!((width, grid.shape()), (8, (8, 2)));

        spec.width = Some(2);
        let err = compose_grid("ab\nz", &spec).unwrap_err();
        assert!(matches!(
            err.root(),
            EncodeError::InsufficientWidth { value: 26, base: 2, width: 2 }
        ));

        spec.width = Some(0);
        assert_eq!(compose_grid("ab", &spec), Err(EncodeError::InvalidWidth));
    }

    #[test]
    fn huge_width_is_rejected_up_front() {
        let spec = GridSpec {
            width: Some(usize::MAX),
            ..GridSpec::default()
        };
        assert!(matches!(
            compose_grid("a", &spec),
            Err(EncodeError::WidthTooLarge { .. })
        ));
        // no characters to encode, so only the up-front check can catch it
        assert!(matches!(
            compose_grid("\n\n", &spec),
            Err(EncodeError::WidthTooLarge { .. })
        ));
    }

    #[test]
    fn crlf_splits_like_lf() {
        let spec = lower_spec(Orientation::Vertical, false);
        let (crlf, width) = compose_grid("ab\r\nz", &spec).unwrap();
        let (lf, _) = compose_grid("ab\nz", &spec).unwrap();
        assert_eq!(crlf, lf);
        assert_eq!(crlf.shape(), (2 * width, 2));
        assert_eq!(
            decode_grid(&crlf, &spec, width).unwrap(),
            vec!["ab".to_string(), "z ".to_string()]
        );
    }

    #[test]
    fn blank_lines_are_padded() {
        let spec = lower_spec(Orientation::Vertical, false);
        let (grid, width) = compose_grid("ab\n\nz", &spec).unwrap();
        assert_eq!(width, 5);
        assert_eq!(grid.shape(), (15, 2));
        assert!((5..10).all(|r| grid.row(r).unwrap() == [0, 0]));
        assert_eq!(
            decode_grid(&grid, &spec, width).unwrap(),
            vec!["ab".to_string(), "  ".to_string(), "z ".to_string()]
        );
    }

    #[test]
    fn pads_with_first_symbol_when_alphabet_lacks_space() {
        let spec = GridSpec {
            base: 2,
            alphabet: "xyz".parse::<Alphabet>().unwrap(),
            ..GridSpec::default()
        };
        let (grid, width) = compose_grid("xy\nz", &spec).unwrap();
        assert_eq!(width, 2);
        assert_eq!(
            grid.to_rows(),
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![0, 0]]
        );
        assert_eq!(
            decode_grid(&grid, &spec, width).unwrap(),
            vec!["xy".to_string(), "zx".to_string()]
        );
    }

    #[test]
    fn decode_rejects_codes_that_overflow() {
        let grid = Grid::from_rows(5, vec![vec![4]; 40]).unwrap();
        assert!(matches!(
            decode_grid(&grid, &GridSpec::default(), 40),
            Err(EncodeError::InvalidGrid(_))
        ));
    }

    #[test]
    fn row_out_of_range_is_none() {
        let grid = Grid::from_rows(2, vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(grid.row(1), Some(&[1u8, 0][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn unknown_symbol_aborts_composition() {
        let err = compose_grid("ab\n9", &lower_spec(Orientation::Vertical, false)).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownSymbol { symbol: '9', .. }));
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(
            compose_grid("", &GridSpec::default()),
            Err(EncodeError::EmptyInput)
        );
    }

    #[test]
    fn decode_recovers_padded_lines() {
        let text = "In a field one\nsummer's day";
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            for separators in [false, true] {
                let spec = GridSpec {
                    orientation,
                    separators,
                    ..GridSpec::default()
                };
                let (grid, width) = compose_grid(text, &spec).unwrap();
                assert_eq!(
                    decode_grid(&grid, &spec, width).unwrap(),
                    vec!["In a field one".to_string(), "summer's day  ".to_string()]
                );
            }
        }
    }

    #[test]
    fn display_concatenates_small_bases() {
        let spec = GridSpec {
            width: Some(5),
            ..lower_spec(Orientation::Horizontal, false)
        };
        let (grid, _) = compose_grid("ab", &spec).unwrap();
        assert_eq!(grid.to_string(), "00001\n00010\n");
        let wide = Grid::from_rows(16, vec![vec![15, 0], vec![3, 10]]).unwrap();
        assert_eq!(wide.to_string(), "15  0\n 3 10\n");
    }

    #[test]
    fn from_rows_validates() {
        assert!(Grid::from_rows(2, vec![vec![0, 1], vec![1]]).is_err());
        assert!(Grid::from_rows(2, vec![vec![0, 2]]).is_err());
    }
}
