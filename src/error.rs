use crate::binding::BindError;
use crate::tree::SourceError;
use thiserror::Error;

/// Top-level error type for the param-binder library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("parameter source error: {0}")]
    Source(#[from] SourceError),

    #[error("binding error: {0}")]
    Bind(#[from] BindError),
}
