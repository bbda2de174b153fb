use std::path::Path;

use super::env::EnvSource;
use super::file::TomlSource;
use super::source::{MapSource, ParamSource};
use super::{ParamTree, SourceError, ROOT_NAME};

/// Builder for assembling one parameter tree from several sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Uniquely named containers are merged recursively; other
/// entries (including repeated list elements) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use param_binder::Params;
///
/// let tree = Params::builder()
///     .with_file("params/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("params/local.toml", false)
///     .build()?;
/// # Ok::<(), param_binder::SourceError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Params {
    sources: Vec<Box<dyn ParamSource>>,
}

impl Params {
    /// Creates a new tree builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build fails if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(TomlSource::file(path, required))
    }

    /// Adds environment variables starting with `prefix` followed by
    /// `separator`. Remaining segments are split on the separator and
    /// lowercased to form the node path.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds flat key/value pairs as direct children of the root.
    pub fn with_map<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_source(MapSource::new(entries))
    }

    /// Adds any other source.
    pub fn with_source(mut self, source: impl ParamSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source and layers the results into one tree.
    pub fn build(self) -> Result<ParamTree, SourceError> {
        let mut merged = ParamTree::new(ROOT_NAME);

        for source in &self.sources {
            tracing::trace!(?source, "merging parameter source");
            merged.merge(source.tree()?);
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_later_sources_override() {
        let mut defaults = NamedTempFile::new().unwrap();
        writeln!(
            defaults,
            r#"
            name = "demo"
            tags = ["a", "b"]

            [server]
            host = "localhost"
            port = "80"
            "#
        )
        .unwrap();

        let tree = Params::builder()
            .with_file(defaults.path(), true)
            .with_source(TomlSource::inline(
                r#"
                tags = ["c"]

                [server]
                port = "8080"
                "#,
            ))
            .with_map([("name", "override")])
            .build()
            .unwrap();

        assert_eq!(tree.get_child("name").and_then(|c| c.value()), Some("override"));

        let tags = tree.get_child("tags").unwrap();
        assert_eq!(tags.children().len(), 1);

        let server = tree.get_child("server").unwrap();
        assert_eq!(server.get_child("host").and_then(|c| c.value()), Some("localhost"));
        assert_eq!(server.get_child("port").and_then(|c| c.value()), Some("8080"));
    }

    #[test]
    fn test_missing_required_file_fails_build() {
        let result = Params::builder()
            .with_file("/nonexistent/params.toml", true)
            .build();

        assert!(matches!(result, Err(SourceError::FileNotFound(_))));
    }

    #[test]
    fn test_empty_builder_yields_empty_root() {
        let tree = Params::builder().build().unwrap();

        assert_eq!(tree.name(), ROOT_NAME);
        assert!(tree.has_no_children());
    }

    #[test]
    fn test_scalar_override_replaces_list_container() {
        let tree = Params::builder()
            .with_source(TomlSource::inline(
                r#"
                [server]
                aliases = ["a", "b"]
                "#,
            ))
            .with_source(TomlSource::inline(
                r#"
                [server]
                aliases = "x"
                "#,
            ))
            .build()
            .unwrap();

        let aliases = tree.get_child("server").unwrap().get_child("aliases").unwrap();
        assert_eq!(aliases.value(), Some("x"));
        assert!(aliases.has_no_children());
    }
}
