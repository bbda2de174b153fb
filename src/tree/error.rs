use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a parameter tree from a source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("required parameter file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read parameter file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse parameter file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse inline parameters: {0}")]
    InlineParse(#[source] toml::de::Error),
}
