use thiserror::Error;

/// Failures raised while turning text into digit codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("'{symbol}' not in alphabet [{alphabet}]")]
    UnknownSymbol { symbol: char, alphabet: String },

    #[error(
        "insufficient width to hold {value} with base {base} and {width} digits; raise base or width"
    )]
    InsufficientWidth { value: u64, base: u32, width: usize },

    #[error("unable to encode '{symbol}' (alphabet index {index})")]
    Character {
        symbol: char,
        index: usize,
        #[source]
        source: Box<EncodeError>,
    },

    #[error("base must be between 2 and 256, got {0}")]
    InvalidBase(u32),

    #[error("digit width must be at least 1")]
    InvalidWidth,

    #[error("digit width {width} exceeds the maximum of {max}")]
    WidthTooLarge { width: usize, max: usize },

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("input text contains no lines")]
    EmptyInput,

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("digit code {index} is outside an alphabet of {len} symbols")]
    IndexOutOfRange { index: u64, len: usize },
}

impl EncodeError {
    /// Innermost error, skipping the per-character annotation.
    pub fn root(&self) -> &EncodeError {
        match self {
            EncodeError::Character { source, .. } => source.root(),
            other => other,
        }
    }
}
