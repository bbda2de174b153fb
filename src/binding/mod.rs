//! Binding parameter trees onto typed targets.

mod engine;
mod error;
mod field;

pub use engine::{Binder, BinderBuilder};
pub use error::BindError;
pub use field::{FieldDescriptor, FieldSpec, FieldTable, FieldType, TypeTag, Value};
