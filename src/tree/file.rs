//! TOML-backed parameter source.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::source::{tree_from_table, ParamSource};
use super::{ParamTree, SourceError, ROOT_NAME};

/// A parameter source that reads a TOML document.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist contribute an empty tree.
#[derive(Debug, Clone)]
pub struct TomlSource {
    origin: Origin,
}

#[derive(Debug, Clone)]
enum Origin {
    File { path: PathBuf, required: bool },
    Inline(String),
}

impl TomlSource {
    /// Creates a file source.
    ///
    /// If `required` is true, loading fails when the file doesn't exist.
    pub fn file(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            origin: Origin::File {
                path: path.as_ref().to_path_buf(),
                required,
            },
        }
    }

    /// Creates a source from TOML text held in memory.
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Inline(text.into()),
        }
    }
}

impl ParamSource for TomlSource {
    fn tree(&self) -> Result<ParamTree, SourceError> {
        let table: toml::Table = match &self.origin {
            Origin::File { path, required } => {
                let Some(text) = read_document(path, *required)? else {
                    return Ok(ParamTree::new(ROOT_NAME));
                };
                toml::from_str(&text).map_err(|source| SourceError::ParseError {
                    path: path.clone(),
                    source,
                })?
            }
            Origin::Inline(text) => toml::from_str(text).map_err(SourceError::InlineParse)?,
        };

        Ok(tree_from_table(ROOT_NAME, &table))
    }
}

/// Reads the whole file. A missing optional file is `Ok(None)`.
fn read_document(path: &Path, required: bool) -> Result<Option<String>, SourceError> {
    let err = match fs::read_to_string(path) {
        Ok(text) => {
            tracing::trace!(path = %path.display(), "loading parameter file");
            return Ok(Some(text));
        }
        Err(err) => err,
    };

    match (err.kind(), required) {
        (ErrorKind::NotFound, false) => {
            tracing::trace!(path = %path.display(), "optional parameter file missing");
            Ok(None)
        }
        (ErrorKind::NotFound, true) => Err(SourceError::FileNotFound(path.to_path_buf())),
        _ => Err(SourceError::ReadError {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}
