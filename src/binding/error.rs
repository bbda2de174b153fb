use thiserror::Error;

use crate::coerce::CoercionError;

/// Why a bind call stopped. Every variant names the field's source name.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error("the parameter {field} is required and has no value")]
    MissingRequiredValue { field: String },

    #[error("type {type_name} of parameter {field} is not available for binding")]
    UnsupportedFieldType { field: String, type_name: String },

    #[error("cannot assign a value to the parameter {field}: {source}")]
    InvalidField {
        field: String,
        source: CoercionError,
    },

    #[error("the parameter {field} has the wrong shape: {source}")]
    InvalidContainerValue {
        field: String,
        source: CoercionError,
    },
}

impl BindError {
    /// Source name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequiredValue { field }
            | Self::UnsupportedFieldType { field, .. }
            | Self::InvalidField { field, .. }
            | Self::InvalidContainerValue { field, .. } => field,
        }
    }
}
