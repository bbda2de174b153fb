//! Field descriptors: what the engine knows about each target field.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Deserialize;
use url::Url;

use crate::coerce::{Color, Font};
use crate::tree::SourceError;

/// The declared type of a field, selecting which coercion runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum TypeTag {
    String,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Date,
    File,
    Url,
    Color,
    Font,
    Array,
    List,
    Map,
    /// A type with no registered coercion.
    Other(String),
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "string" | "str" => Self::String,
            "int" | "integer" | "i32" => Self::Int,
            "long" | "i64" => Self::Long,
            "float" | "f32" => Self::Float,
            "double" | "f64" => Self::Double,
            "bool" | "boolean" => Self::Bool,
            "date" | "datetime" => Self::Date,
            "file" | "path" => Self::File,
            "url" => Self::Url,
            "color" | "colour" => Self::Color,
            "font" => Self::Font,
            "array" => Self::Array,
            "list" => Self::List,
            "map" => Self::Map,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::File => "file",
            Self::Url => "url",
            Self::Color => "color",
            Self::Font => "font",
            Self::Array => "array",
            Self::List => "list",
            Self::Map => "map",
            Self::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Date(NaiveDateTime),
    File(PathBuf),
    Url(Url),
    Color(Color),
    Font(Font),
    Array(Box<[String]>),
    List(Vec<String>),
    Map(HashMap<String, String>),
}

/// Rust types a field may have, tied to the coercion that produces them.
pub trait FieldType: Sized {
    fn type_tag() -> TypeTag;

    /// Unwraps the matching variant, handing back anything else.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_field_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn type_tag() -> TypeTag {
                    TypeTag::$variant
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_field_type! {
    String => String,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    NaiveDateTime => Date,
    PathBuf => File,
    Url => Url,
    Color => Color,
    Font => Font,
    Box<[String]> => Array,
    Vec<String> => List,
    HashMap<String, String> => Map,
}

impl<X: FieldType> FieldType for Option<X> {
    fn type_tag() -> TypeTag {
        X::type_tag()
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        X::from_value(value).map(Some)
    }
}

/// Per-field metadata, as declared next to a field or in a TOML table.
///
/// Empty strings count as "not given": an empty `name` keeps the field's own
/// identifier and an empty `default` means no default.
///
/// ```
/// use param_binder::FieldSpec;
///
/// let specs = FieldSpec::table_from_toml(
///     r#"
///     port = { name = "server.port", required = true }
///     hosts = { default = "a,b" }
///     "#,
/// )?;
/// assert!(specs["port"].required);
/// # Ok::<(), param_binder::SourceError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSpec {
    pub name: Option<String>,
    pub required: bool,
    #[serde(rename = "default")]
    pub default_value: Option<String>,
}

impl FieldSpec {
    /// Parses a table mapping field identifiers to their specs.
    pub fn table_from_toml(text: &str) -> Result<HashMap<String, FieldSpec>, SourceError> {
        toml::from_str(text).map_err(SourceError::InlineParse)
    }
}

type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), Value> + Send + Sync>;

/// Everything the engine needs to bind one field of `T`.
pub struct FieldDescriptor<T> {
    source_name: String,
    required: bool,
    default_literal: Option<String>,
    declared_type: TypeTag,
    setter: Setter<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Describes a field whose declared type follows from the setter's
    /// argument type. The source name starts out as `ident`.
    ///
    /// ```
    /// use param_binder::FieldDescriptor;
    ///
    /// struct Server { port: i32 }
    ///
    /// let port = FieldDescriptor::new("port", |s: &mut Server, v: i32| s.port = v)
    ///     .named("server.port")
    ///     .default_value("8080");
    /// assert_eq!(port.source_name(), "server.port");
    /// ```
    pub fn new<X, F>(ident: impl Into<String>, set: F) -> Self
    where
        X: FieldType + 'static,
        F: Fn(&mut T, X) + Send + Sync + 'static,
    {
        Self::with_type(ident, X::type_tag(), move |target, value| {
            set(target, X::from_value(value)?);
            Ok(())
        })
    }

    /// Describes a field with an explicit type tag and an untyped setter.
    /// The setter returns the value back if it cannot store it.
    pub fn with_type<F>(ident: impl Into<String>, declared_type: TypeTag, set: F) -> Self
    where
        F: Fn(&mut T, Value) -> Result<(), Value> + Send + Sync + 'static,
    {
        Self {
            source_name: ident.into(),
            required: false,
            default_literal: None,
            declared_type,
            setter: Box::new(set),
        }
    }
}

impl<T> FieldDescriptor<T> {
    /// Reads the field from `name` instead of its identifier.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Literal used when the parameter tree has no entry for this field.
    pub fn default_value(mut self, literal: impl Into<String>) -> Self {
        self.default_literal = Some(literal.into());
        self
    }

    /// Applies declared metadata.
    pub fn with_spec(mut self, spec: &FieldSpec) -> Self {
        if let Some(name) = spec.name.as_deref().filter(|n| !n.is_empty()) {
            self.source_name = name.to_string();
        }
        self.required = spec.required;
        self.default_literal = spec
            .default_value
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_literal(&self) -> Option<&str> {
        self.default_literal.as_deref()
    }

    pub fn declared_type(&self) -> &TypeTag {
        &self.declared_type
    }

    pub(crate) fn assign(&self, target: &mut T, value: Value) -> Result<(), Value> {
        (self.setter)(target, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("source_name", &self.source_name)
            .field("required", &self.required)
            .field("default_literal", &self.default_literal)
            .field("declared_type", &self.declared_type)
            .finish_non_exhaustive()
    }
}

/// Types that publish a descriptor for each bindable field.
pub trait FieldTable: Sized + 'static {
    fn fields() -> Vec<FieldDescriptor<Self>>;
}
