//! Shared text style: font size, family, and colours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use memegen_common::error::{MemeError, MemeResult};

/// Smallest font size the editor accepts.
pub const MIN_FONT_SIZE: u32 = 10;
/// Largest font size the editor accepts.
pub const MAX_FONT_SIZE: u32 = 100;

/// Width of the black outline drawn around every glyph.
pub const STROKE_WIDTH: u32 = 2;

/// Font families offered by the editor.
pub const FONT_STYLES: &[&str] = &[
    "Impact",
    "Arial",
    "Helvetica",
    "Comic Sans MS",
    "Times New Roman",
    "Courier New",
    "Verdana",
    "Georgia",
    "Palatino",
    "Garamond",
    "Bookman",
    "Trebuchet MS",
    "Arial Black",
];

/// An opaque-or-translucent RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb`, `#rgb`, or `#rrggbbaa`.
    pub fn parse_hex(input: &str) -> MemeResult<Self> {
        let invalid = || MemeError::validation(format!("invalid colour '{input}', expected #rrggbb"));
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = byte(&c.to_string())?;
                    channels[i] = v * 17;
                }
                Ok(Color::rgb(channels[0], channels[1], channels[2]))
            }
            6 | 8 => {
                let r = byte(&hex[0..2])?;
                let g = byte(&hex[2..4])?;
                let b = byte(&hex[4..6])?;
                let a = if hex.len() == 8 { byte(&hex[6..8])? } else { 255 };
                Ok(Color { r, g, b, a })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Style shared by both overlays. Stroke colour and width are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: u32,
    pub font_family: String,
    pub fill: Color,
}

impl TextStyle {
    pub fn new(font_size: u32, font_family: impl Into<String>, fill: Color) -> Self {
        Self {
            font_size: clamp_font_size(font_size),
            font_family: font_family.into(),
            fill,
        }
    }

    /// Canvas-style font shorthand, e.g. `30px Impact`.
    pub fn font_shorthand(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }

    pub fn stroke(&self) -> Color {
        Color::BLACK
    }

    pub fn stroke_width(&self) -> u32 {
        STROKE_WIDTH
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(30, "Impact", Color::WHITE)
    }
}

/// Keep a requested font size inside the accepted range.
pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}
