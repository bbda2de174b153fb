//! The binding engine.

use crate::coerce::{Coercer, CoercionError, Input, PathNormalizer};
use crate::tree::{ParamTree, ROOT_NAME};

use super::field::{FieldDescriptor, FieldTable, TypeTag, Value};
use super::BindError;

/// Binds parameter trees onto targets through their field descriptors.
///
/// Fields are processed in descriptor order and the first fatal error aborts
/// the call. In strict mode (the default) a list, array or map field given a
/// wrong-shape source is fatal; otherwise the field is left as it was.
///
/// ## Example
///
/// ```
/// use param_binder::{Binder, FieldDescriptor, ParamTree};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: i32,
///     aliases: Vec<String>,
/// }
///
/// let fields = vec![
///     FieldDescriptor::new("host", |s: &mut Server, v: String| s.host = v).required(),
///     FieldDescriptor::new("port", |s: &mut Server, v: i32| s.port = v).default_value("8080"),
///     FieldDescriptor::new("aliases", |s: &mut Server, v: Vec<String>| s.aliases = v),
/// ];
///
/// let params = ParamTree::new("params")
///     .with_value("host", "example.com")
///     .with_child(
///         ParamTree::new("aliases")
///             .with_value("alias", "www.example.com")
///             .with_value("alias", "example.org"),
///     );
///
/// let mut server = Server::default();
/// Binder::new().bind(&params, &mut server, &fields)?;
///
/// assert_eq!(server.host, "example.com");
/// assert_eq!(server.port, 8080);
/// assert_eq!(server.aliases, ["www.example.com", "example.org"]);
/// # Ok::<(), param_binder::BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Binder {
    strict: bool,
    coercer: Coercer,
}

impl Default for Binder {
    fn default() -> Self {
        Self {
            strict: true,
            coercer: Coercer::default(),
        }
    }
}

impl Binder {
    /// Creates a strict binder with the default coercions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> BinderBuilder {
        BinderBuilder::default()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    /// Lifts a flat key/value map into a one-level tree and binds it.
    pub fn bind_map<T, I, K, V>(
        &self,
        entries: I,
        target: &mut T,
        fields: &[FieldDescriptor<T>],
    ) -> Result<(), BindError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = ParamTree::from_map(ROOT_NAME, entries);
        self.bind(&params, target, fields)
    }

    /// Binds using the target type's own descriptor table.
    ///
    /// The table is rebuilt on every call. Callers binding the same type
    /// repeatedly can build it once with [`FieldTable::fields`] and pass it to
    /// [`bind`](Self::bind).
    pub fn bind_object<T: FieldTable>(
        &self,
        params: &ParamTree,
        target: &mut T,
    ) -> Result<(), BindError> {
        self.bind(params, target, &T::fields())
    }

    /// Resolves, coerces and assigns every field of `target` from the direct
    /// children of `params`.
    pub fn bind<T>(
        &self,
        params: &ParamTree,
        target: &mut T,
        fields: &[FieldDescriptor<T>],
    ) -> Result<(), BindError> {
        tracing::debug!(
            params = params.name(),
            fields = fields.len(),
            strict = self.strict,
            "binding parameters"
        );

        for field in fields {
            self.bind_field(params, target, field)?;
        }

        Ok(())
    }

    fn bind_field<T>(
        &self,
        params: &ParamTree,
        target: &mut T,
        field: &FieldDescriptor<T>,
    ) -> Result<(), BindError> {
        let name = field.source_name();

        let input = match (params.get_child(name), field.default_literal()) {
            (Some(node), _) => Input::Node(node),
            (None, Some(literal)) => {
                tracing::debug!(field = name, default = literal, "using default value");
                Input::Text(literal)
            }
            (None, None) if field.is_required() => {
                return Err(BindError::MissingRequiredValue {
                    field: name.to_string(),
                });
            }
            (None, None) => {
                tracing::debug!(field = name, "no value, skipping");
                return Ok(());
            }
        };

        let Some(coerced) = self.coerce(input, field.declared_type()) else {
            return Err(BindError::UnsupportedFieldType {
                field: name.to_string(),
                type_name: field.declared_type().to_string(),
            });
        };

        let value = match coerced {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(field = name, "parameter has no scalar value, skipping");
                return Ok(());
            }
            Err(source) if source.is_container_fault() => {
                if self.strict {
                    return Err(BindError::InvalidContainerValue {
                        field: name.to_string(),
                        source,
                    });
                }
                tracing::warn!(field = name, error = %source, "ignoring wrong-shape value");
                return Ok(());
            }
            Err(source) => {
                return Err(BindError::InvalidField {
                    field: name.to_string(),
                    source,
                });
            }
        };

        tracing::debug!(field = name, value = ?value, "assigning");
        field
            .assign(target, value)
            .map_err(|_| BindError::UnsupportedFieldType {
                field: name.to_string(),
                type_name: field.declared_type().to_string(),
            })
    }

    /// Runs the coercion for `declared`. `None` means the type has none.
    fn coerce(
        &self,
        input: Input<'_>,
        declared: &TypeTag,
    ) -> Option<Result<Option<Value>, CoercionError>> {
        let c = &self.coercer;
        let result = match declared {
            TypeTag::String => Ok(Some(Value::String(c.string(input)))),
            TypeTag::Int => c.int(input).map(|v| v.map(Value::Int)),
            TypeTag::Long => c.long(input).map(|v| v.map(Value::Long)),
            TypeTag::Float => c.float(input).map(|v| v.map(Value::Float)),
            TypeTag::Double => c.double(input).map(|v| v.map(Value::Double)),
            TypeTag::Bool => Ok(c.boolean(input).map(Value::Bool)),
            TypeTag::Date => c.date(input).map(|v| v.map(Value::Date)),
            TypeTag::File => Ok(c.file(input).map(Value::File)),
            TypeTag::Url => c.url(input).map(|v| v.map(Value::Url)),
            TypeTag::Color => c.color(input).map(|v| v.map(Value::Color)),
            TypeTag::Font => Ok(c.font(input).map(Value::Font)),
            TypeTag::Array => c.array(input).map(|v| Some(Value::Array(v))),
            TypeTag::List => c.list(input).map(|v| Some(Value::List(v))),
            TypeTag::Map => c.map(input).map(|v| Some(Value::Map(v))),
            TypeTag::Other(_) => return None,
        };
        Some(result)
    }
}

/// Builder for a configured [`Binder`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct BinderBuilder {
    strict: Option<bool>,
    coercer: Coercer,
}

impl BinderBuilder {
    /// Whether wrong-shape container values abort binding. Defaults to `true`.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Replaces the ordered list of date formats tried for date fields.
    pub fn date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coercer = self.coercer.with_date_formats(formats);
        self
    }

    /// Replaces the separator normalization used for file fields.
    pub fn path_normalizer(mut self, normalizer: impl PathNormalizer + 'static) -> Self {
        self.coercer = self.coercer.with_path_normalizer(normalizer);
        self
    }

    pub fn build(self) -> Binder {
        Binder {
            strict: self.strict.unwrap_or(true),
            coercer: self.coercer,
        }
    }
}
