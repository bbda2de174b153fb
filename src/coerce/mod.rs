//! Conversion of raw strings and tree nodes into typed values.

mod error;
pub mod scalar;
mod style;
mod tree;

pub use error::{CoercionError, CoercionKind};
pub use style::{Color, ColorDecodeError, Font, FontStyle};
pub use tree::{Coercer, Input};

/// Converts path separators in a raw path string.
pub trait PathNormalizer: Send + Sync + std::fmt::Debug {
    fn normalize(&self, raw: &str) -> String;
}

/// Rewrites both `/` and `\` to the host's separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSeparators;

impl PathNormalizer for SystemSeparators {
    fn normalize(&self, raw: &str) -> String {
        raw.chars()
            .map(|c| match c {
                '/' | '\\' => std::path::MAIN_SEPARATOR,
                other => other,
            })
            .collect()
    }
}
