use std::collections::HashMap;
use std::str::FromStr;

use crate::core::error::EncodeError;

/// First codepoint of the default alphabet (space).
pub const DEFAULT_FIRST: u32 = 32;
/// Last codepoint of the default alphabet (`z`), inclusive.
pub const DEFAULT_LAST: u32 = 122;

/// Ordered, duplicate-free set of symbols. A symbol's index is its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self, EncodeError> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(EncodeError::InvalidAlphabet(
                "alphabet must contain at least one symbol".to_string(),
            ));
        }
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &ch) in symbols.iter().enumerate() {
            if index.insert(ch, i).is_some() {
                return Err(EncodeError::InvalidAlphabet(format!(
                    "duplicate symbol '{ch}'"
                )));
            }
        }
        Ok(Self { symbols, index })
    }

    /// Zero-based position of `symbol`.
    pub fn index_of(&self, symbol: char) -> Result<usize, EncodeError> {
        self.index
            .get(&symbol)
            .copied()
            .ok_or_else(|| EncodeError::UnknownSymbol {
                symbol,
                alphabet: self.as_string(),
            })
    }

    pub fn symbol_at(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Padding symbol for short lines: space when present, otherwise index 0.
    pub fn blank(&self) -> char {
        if self.contains(' ') { ' ' } else { self.symbols[0] }
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }
}

impl FromStr for Alphabet {
    type Err = EncodeError;

    /// The characters of `s`, in order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars())
    }
}

impl Default for Alphabet {
    /// Codepoints 32 through 122 in order: space, punctuation, digits, upper and lower case.
    fn default() -> Self {
        let symbols = (DEFAULT_FIRST..=DEFAULT_LAST).filter_map(char::from_u32);
        let symbols: Vec<char> = symbols.collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }
}
