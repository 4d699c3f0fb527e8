use crate::core::alphabet::Alphabet;
use crate::core::digits::{check_width, to_digits};
use crate::core::error::EncodeError;

/// Fixed-width digit sequence for one symbol, most significant digit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCode(pub Vec<u8>);

impl CharacterCode {
    pub fn digits(&self) -> &[u8] {
        &self.0
    }
}

/// Codes for every character of one line, all sharing `width` and `base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    codes: Vec<CharacterCode>,
    width: usize,
    base: u32,
}

impl Line {
    pub fn codes(&self) -> &[CharacterCode] {
        &self.codes
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Encode a single symbol with an explicit width.
pub fn encode_char(
    symbol: char,
    base: u32,
    width: usize,
    alphabet: &Alphabet,
) -> Result<CharacterCode, EncodeError> {
    let index = alphabet.index_of(symbol)?;
    to_digits(index as u64, base, Some(width))
        .map(CharacterCode)
        .map_err(|err| match err {
            EncodeError::InsufficientWidth { .. } => EncodeError::Character {
                symbol,
                index,
                source: Box::new(err),
            },
            other => other,
        })
}

/// Encode every character of `text` with the shared `width`.
///
/// The width is never inferred here: when a paragraph is encoded line by
/// line, the caller computes it once over the whole paragraph.
pub fn encode_line(
    text: &str,
    base: u32,
    width: usize,
    alphabet: &Alphabet,
) -> Result<Line, EncodeError> {
    check_width(width)?;
    let codes = text
        .chars()
        .map(|ch| encode_char(ch, base, width, alphabet))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Line { codes, width, base })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lower() -> Alphabet {
        " abcdefghijklmnopqrstuvwxyz/".parse::<Alphabet>().unwrap()
    }

    #[test]
    fn encodes_against_literal_alphabet_order() {
        let line = encode_line("ab/", 2, 5, &lower()).unwrap();
        let codes: Vec<&[u8]> = line.codes().iter().map(CharacterCode::digits).collect();
        assert_eq!(
            codes,
            vec![
                &[0u8, 0, 0, 0, 1][..],
                &[0, 0, 0, 1, 0][..],
                &[1, 1, 0, 1, 1][..],
            ]
        );
        assert_eq!(line.width(), 5);
        assert_eq!(line.base(), 2);
    }

    #[test]
    fn unknown_symbol_propagates_unchanged() {
        let err = encode_line("a9", 2, 5, &lower()).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownSymbol { symbol: '9', .. }));
    }

    #[test]
    fn width_failure_names_character_and_index() {
        let err = encode_line("az", 2, 4, &lower()).unwrap_err();
        match &err {
            EncodeError::Character { symbol, index, .. } => {
                assert_eq!(*symbol, 'z');
                assert_eq!(*index, 26);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(
            err.root(),
            &EncodeError::InsufficientWidth {
                value: 26,
                base: 2,
                width: 4
            }
        );
    }

    #[test]
    fn zero_width_rejected() {
        assert_eq!(
            encode_line("a", 2, 0, &lower()),
            Err(EncodeError::InvalidWidth)
        );
    }

    #[test]
    fn empty_line_has_no_codes() {
        assert!(encode_line("", 5, 3, &Alphabet::default()).unwrap().is_empty());
    }
}
