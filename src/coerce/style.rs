//! Compact textual notations for colors and fonts.

use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ColorDecodeError {
    #[error("sign must precede the radix prefix")]
    MisplacedSign,

    #[error("value does not fit in 32 bits")]
    OutOfRange,

    #[error(transparent)]
    Digits(#[from] ParseIntError),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0xFF,
        }
    }

    /// Builds a color from the low 24 bits of `packed` (`0xRRGGBB`).
    pub const fn from_packed(packed: i32) -> Self {
        Self::rgb(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        )
    }

    /// Decodes `#RRGGBB`, `0xRRGGBB`, octal (`0` prefix) or decimal notation.
    /// An optional sign may precede the prefix.
    pub fn decode(raw: &str) -> Result<Self, ColorDecodeError> {
        decode_int(raw).map(Self::from_packed)
    }
}

fn decode_int(raw: &str) -> Result<i32, ColorDecodeError> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .or_else(|| body.strip_prefix('#'))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.starts_with(['-', '+']) {
        return Err(ColorDecodeError::MisplacedSign);
    }

    let magnitude = i64::from_str_radix(digits, radix)?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| ColorDecodeError::OutOfRange)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "plain" => Some(Self::Plain),
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "bolditalic" => Some(Self::BoldItalic),
            _ => None,
        }
    }
}

/// A font request: family, style and point size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: String,
    pub style: FontStyle,
    pub size: u32,
}

impl Font {
    pub const DEFAULT_FAMILY: &'static str = "Dialog";
    pub const DEFAULT_SIZE: u32 = 12;

    pub fn new(family: impl Into<String>, style: FontStyle, size: u32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    /// Decodes `Family-STYLE-size`. Spaces work as separators too, whichever
    /// occurs last wins. Style and size are optional; unknown styles stay part
    /// of the family name. Never fails.
    pub fn decode(raw: &str) -> Self {
        let sep = if raw.rfind('-') > raw.rfind(' ') { '-' } else { ' ' };

        let mut family = raw;
        let mut size = Self::DEFAULT_SIZE;
        if let Some((head, tail)) = split_last_token(family, sep) {
            if let Ok(n) = tail.parse::<i64>() {
                size = u32::try_from(n)
                    .ok()
                    .filter(|&n| n > 0)
                    .unwrap_or(Self::DEFAULT_SIZE);
                family = head;
            }
        }

        let mut style = FontStyle::Plain;
        if let Some((head, tail)) = split_last_token(family, sep) {
            if let Some(parsed) = FontStyle::from_name(tail) {
                style = parsed;
                family = head;
            }
        }

        if family.is_empty() {
            family = Self::DEFAULT_FAMILY;
        }

        Self::new(family, style, size)
    }
}

fn split_last_token(s: &str, sep: char) -> Option<(&str, &str)> {
    let (head, tail) = s.rsplit_once(sep)?;
    (!head.is_empty() && !tail.is_empty()).then_some((head, tail))
}
