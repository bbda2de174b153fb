pub mod binding;
pub mod coerce;
pub mod tree;
mod error;

pub use binding::{
    BindError, Binder, BinderBuilder, FieldDescriptor, FieldSpec, FieldTable, FieldType, TypeTag,
    Value,
};
pub use coerce::{
    Coercer, CoercionError, CoercionKind, Color, Font, FontStyle, Input, PathNormalizer,
    SystemSeparators,
};
pub use error::Error;
pub use tree::{EnvSource, MapSource, ParamSource, ParamTree, Params, SourceError, TomlSource, ROOT_NAME};
