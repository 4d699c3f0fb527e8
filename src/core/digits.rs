use crate::core::error::EncodeError;

pub const MIN_BASE: u32 = 2;
/// Digits are stored as `u8`, so a base may not exceed 256.
pub const MAX_BASE: u32 = 256;
/// Any `u64` fits in 64 base-2 digits; wider codes are never needed.
pub const MAX_WIDTH: usize = 64;

pub fn check_base(base: u32) -> Result<(), EncodeError> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(EncodeError::InvalidBase(base))
    }
}

/// Digit width usable for grid codes: `1..=MAX_WIDTH`.
pub fn check_width(width: usize) -> Result<(), EncodeError> {
    match width {
        0 => Err(EncodeError::InvalidWidth),
        w if w > MAX_WIDTH => Err(EncodeError::WidthTooLarge {
            width: w,
            max: MAX_WIDTH,
        }),
        _ => Ok(()),
    }
}

/// `base^width > value`, treating overflow as "fits".
fn fits(value: u64, base: u32, width: usize) -> bool {
    match u32::try_from(width)
        .ok()
        .and_then(|w| u64::from(base).checked_pow(w))
    {
        Some(capacity) => capacity > value,
        None => true,
    }
}

/// Convert `value` to base-`base` digits, most significant first.
///
/// With `width`, the result is left-padded with zeros to exactly `width`
/// digits, and a value that cannot fit fails with
/// [`EncodeError::InsufficientWidth`] instead of being truncated.
/// Without `width`, zero encodes to an empty sequence. Widths above
/// [`MAX_WIDTH`] are rejected before anything is allocated.
pub fn to_digits(value: u64, base: u32, width: Option<usize>) -> Result<Vec<u8>, EncodeError> {
    check_base(base)?;
    if let Some(width) = width {
        if width > MAX_WIDTH {
            return Err(EncodeError::WidthTooLarge {
                width,
                max: MAX_WIDTH,
            });
        }
        if !fits(value, base, width) {
            return Err(EncodeError::InsufficientWidth { value, base, width });
        }
    }

    let base = u64::from(base);
    let mut digits = Vec::with_capacity(width.unwrap_or(8));
    let mut rest = value;
    while rest > 0 {
        // remainder < base <= 256
        digits.push((rest % base) as u8);
        rest /= base;
    }
    if let Some(width) = width {
        digits.resize(width, 0);
    }
    digits.reverse();
    Ok(digits)
}

/// Smallest width of at least one digit such that `base^width > max_value`.
pub fn min_width_for(max_value: u64, base: u32) -> Result<usize, EncodeError> {
    check_base(base)?;
    let mut width = 1;
    while !fits(max_value, base, width) {
        width += 1;
    }
    Ok(width)
}

/// Evaluate most-significant-first digits back to their value, or `None`
/// if it does not fit in a `u64`.
pub fn from_digits(digits: &[u8], base: u32) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, &d| {
        acc.checked_mul(u64::from(base))?.checked_add(u64::from(d))
    })
}
