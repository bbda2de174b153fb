use toml::{Table, Value};

use super::{ParamTree, SourceError, ROOT_NAME};

/// Anything that can produce a parameter tree.
pub trait ParamSource: Send + Sync + std::fmt::Debug {
    fn tree(&self) -> Result<ParamTree, SourceError>;
}

/// A flat key/value map lifted into a one-level tree.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    entries: Vec<(String, String)>,
}

impl MapSource {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ParamSource for MapSource {
    fn tree(&self) -> Result<ParamTree, SourceError> {
        Ok(ParamTree::from_map(ROOT_NAME, self.entries.iter().cloned()))
    }
}

/// Converts a TOML table into a tree rooted at `name`.
///
/// Tables become container nodes, arrays become repeated children named after
/// the array's key, and scalars become leaves.
pub(crate) fn tree_from_table(name: &str, table: &Table) -> ParamTree {
    let mut node = ParamTree::new(name);
    for (key, value) in table {
        append_value(&mut node, key, value);
    }
    node
}

fn append_value(parent: &mut ParamTree, key: &str, value: &Value) {
    match value {
        Value::Table(t) => {
            parent.add_child(tree_from_table(key, t));
        }
        Value::Array(items) => {
            let mut list = ParamTree::new(key);
            for item in items {
                append_value(&mut list, key, item);
            }
            parent.add_child(list);
        }
        scalar => {
            parent.add_value(key, scalar_text(scalar));
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) => String::new(),
    }
}
