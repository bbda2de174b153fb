use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

use super::style::ColorDecodeError;

/// Broad category of a [`CoercionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionKind {
    NumberFormat,
    DateFormat,
    UrlFormat,
    ColorFormat,
    EmptyContainer,
    NestedContainer,
}

/// A raw value that could not be turned into the requested type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoercionError {
    #[error("'{input}' is not a valid integer: {source}")]
    Integer {
        input: String,
        source: ParseIntError,
    },

    #[error("'{input}' is not a valid number: {source}")]
    Float {
        input: String,
        source: ParseFloatError,
    },

    #[error("'{input}' does not match any date format (last tried '{format}'): {source}")]
    Date {
        input: String,
        format: String,
        source: chrono::ParseError,
    },

    #[error("no date formats configured to parse '{input}'")]
    NoDateFormats { input: String },

    #[error("malformed URL '{input}': {source}")]
    Url {
        input: String,
        source: url::ParseError,
    },

    #[error("malformed URL '{input}': unknown protocol '{scheme}'")]
    UnknownScheme { input: String, scheme: String },

    #[error("'{input}' is not a valid color: {source}")]
    Color {
        input: String,
        source: ColorDecodeError,
    },

    #[error("parameter '{name}' does not contain any children")]
    EmptyContainer { name: String },

    #[error("element '{name}' has children instead of a value")]
    NestedContainer { name: String },
}

impl CoercionError {
    pub fn kind(&self) -> CoercionKind {
        match self {
            Self::Integer { .. } | Self::Float { .. } => CoercionKind::NumberFormat,
            Self::Date { .. } | Self::NoDateFormats { .. } => CoercionKind::DateFormat,
            Self::Url { .. } | Self::UnknownScheme { .. } => CoercionKind::UrlFormat,
            Self::Color { .. } => CoercionKind::ColorFormat,
            Self::EmptyContainer { .. } => CoercionKind::EmptyContainer,
            Self::NestedContainer { .. } => CoercionKind::NestedContainer,
        }
    }

    /// True when the source had the wrong shape for a list, array or map,
    /// as opposed to a scalar that failed to parse.
    pub fn is_container_fault(&self) -> bool {
        matches!(
            self.kind(),
            CoercionKind::EmptyContainer | CoercionKind::NestedContainer
        )
    }
}
