//! Color types and utilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a color string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color string must start with '#': {0:?}")]
    MissingHash(String),

    #[error("color string must have 6 or 8 hex digits, found {len}: {value:?}")]
    BadLength { value: String, len: usize },

    #[error("color string contains non-hex characters: {0:?}")]
    NotHex(String),
}

/// RGBA color with 8-bit channels (0-255)
///
/// Channels are kept as bytes so that a parsed hex string maps back to the
/// exact digits it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    ///
    /// Values up to 0xFFFFFF are treated as opaque RGB.
    pub const fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::new(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::rgb(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        }
    }

    /// Parse `#RRGGBB` (opaque) or `#RRGGBBAA`
    ///
    /// Alpha is always the trailing byte. Anything else is rejected, including
    /// named colors, 3/4-digit shorthands and surrounding whitespace.
    pub fn parse_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(value.to_string()))?;

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::NotHex(value.to_string()));
        }

        let parsed = u32::from_str_radix(digits, 16);
        match (digits.len(), parsed) {
            (6, Ok(rgb)) => Ok(Self::rgb(
                ((rgb >> 16) & 0xFF) as u8,
                ((rgb >> 8) & 0xFF) as u8,
                (rgb & 0xFF) as u8,
            )),
            (8, Ok(rgba)) => Ok(Self::new(
                ((rgba >> 24) & 0xFF) as u8,
                ((rgba >> 16) & 0xFF) as u8,
                ((rgba >> 8) & 0xFF) as u8,
                (rgba & 0xFF) as u8,
            )),
            (len, _) => Err(ColorParseError::BadLength {
                value: value.to_string(),
                len,
            }),
        }
    }

    /// Set alpha and return new color
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { a: alpha, ..self }
    }

    /// Convert to u8 array [r, g, b, a]
    pub const fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Packed 0xAARRGGBB, the layout Android color ints use
    pub const fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Normalized float components [r, g, b, a] in 0.0..=1.0, the UIKit convention
    pub fn to_f32_components(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}
