use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RenderError;

/// An sRGB colour, one byte per channel. Colours are written in settings files as
/// `#RRGGBB` hex strings
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour, r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string
    pub fn from_hex(hex: &str) -> Result<Colour, RenderError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(RenderError::InvalidColour(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| RenderError::InvalidColour(hex.to_string()))
        };

        Ok(Colour {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Convert to an opaque [image::Rgba] pixel
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Colour {
    type Error = RenderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Colour::from_hex(&s)
    }
}

impl From<Colour> for String {
    fn from(c: Colour) -> Self {
        c.to_string()
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

/// A list of pre-defined colour constants, including the defaults of the menu template
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::new_rgb_bytes(0, 0, 0);
    pub const WHITE: Colour = Colour::new_rgb_bytes(255, 255, 255);
    /// Date block outline
    pub const ORANGE: Colour = Colour::new_rgb_bytes(0xF2, 0x99, 0x4A);
    /// Notice panel outline and text
    pub const BRICK: Colour = Colour::new_rgb_bytes(0xC0, 0x39, 0x2B);
    /// Notice panel background
    pub const PEACH: Colour = Colour::new_rgb_bytes(0xFC, 0xE4, 0xD6);
}
