use super::source::ParamSource;
use super::{ParamTree, SourceError, ROOT_NAME};

/// Reads parameters from environment variables sharing a prefix.
///
/// `MYAPP__DATABASE__HOST=localhost` with prefix `MYAPP` and separator `__`
/// lands at `database.host` in the produced tree.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    fn tree_from_vars(&self, vars: impl Iterator<Item = (String, String)>) -> ParamTree {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut tree = ParamTree::new(ROOT_NAME);

        for (key, value) in vars {
            let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if path_str.is_empty() {
                continue;
            }

            let path: Vec<String> = path_str
                .split(&self.separator)
                .map(|s| s.to_lowercase())
                .collect();

            tracing::trace!(var = %key, "reading parameter from environment");
            tree.put_path(&path, value);
        }

        tree
    }
}

impl ParamSource for EnvSource {
    fn tree(&self) -> Result<ParamTree, SourceError> {
        Ok(self.tree_from_vars(std::env::vars()))
    }
}
