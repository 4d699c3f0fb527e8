use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::render::paint::RenderError;

/// Opaque RGB endpoint color used when colorizing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::new(255, 0, 0),
            "green" => Self::new(0, 128, 0),
            "lime" => Self::new(0, 255, 0),
            "blue" => Self::new(0, 0, 255),
            "yellow" => Self::new(255, 255, 0),
            "cyan" => Self::new(0, 255, 255),
            "magenta" => Self::new(255, 0, 255),
            "orange" => Self::new(255, 165, 0),
            "gray" | "grey" => Self::new(128, 128, 128),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = RenderError;

    /// Accepts a color name, `#rrggbb`, or `r,g,b`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || RenderError::InvalidColor(s.to_string());

        if let Some(hex) = raw.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }

        if raw.contains(',') {
            let parts = raw
                .split(',')
                .map(|p| p.trim().parse::<u8>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>, _>>()?;
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b)),
                _ => Err(invalid()),
            };
        }

        Self::named(&raw.to_ascii_lowercase()).ok_or_else(invalid)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_names_hex_and_triples() {
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#96c864".parse::<Color>().unwrap(), Color::new(150, 200, 100));
        assert_eq!("0, 128,255".parse::<Color>().unwrap(), Color::new(0, 128, 255));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["chartreuse-ish", "#12345", "#gg0000", "1,2", "1,2,300"] {
            assert!(bad.parse::<Color>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn serializes_as_hex() {
        let json = serde_json::to_string(&Color::new(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(back, Color::new(255, 0, 0));
    }
}
