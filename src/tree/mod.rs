//! Hierarchical parameter trees.
//!
//! A [`ParamTree`] holds string values under named nodes. Children keep their
//! insertion order and may repeat a name, which is how list-like values are
//! represented; name lookups always return the most recently registered child.

mod builder;
mod env;
mod error;
mod file;
mod source;

use std::collections::HashMap;

pub use builder::Params;
pub use env::EnvSource;
pub use error::SourceError;
pub use file::TomlSource;
pub use source::{MapSource, ParamSource};

/// Name given to the synthetic root when a flat map is lifted into a tree.
pub const ROOT_NAME: &str = "root";

/// A named node carrying an optional value and an ordered list of children.
///
/// ```
/// use param_binder::ParamTree;
///
/// let mut params = ParamTree::new("params");
/// params
///     .add_value("tag", "a")
///     .add_value("tag", "b")
///     .put_child("mode", "fast");
///
/// assert_eq!(params.children().len(), 3);
/// assert_eq!(params.get_child("tag").and_then(|t| t.value()), Some("b"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTree {
    name: String,
    value: Option<String>,
    children: Vec<ParamTree>,
    index: HashMap<String, usize>,
}

impl ParamTree {
    /// Creates an empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a leaf node holding `value`.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Lifts a flat key/value map into a one-level tree under `name`.
    pub fn from_map<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut tree = Self::new(name);
        tree.load(entries);
        tree
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    /// Upserts every pair as a direct child. Later duplicate keys overwrite
    /// earlier ones.
    pub fn load<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.put_child(key, value);
        }
        self
    }

    /// Overwrites the value of the child registered under `name`, or appends
    /// a new leaf if there is none.
    pub fn put_child(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => {
                self.children[pos].value = Some(value.into());
            }
            None => {
                self.add_child(Self::leaf(name, value));
            }
        }
        self
    }

    /// Appends a leaf, even if a child with the same name already exists.
    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add_child(Self::leaf(name, value))
    }

    /// Appends `child` and makes it the one returned by name lookups.
    pub fn add_child(&mut self, child: ParamTree) -> &mut Self {
        self.index.insert(child.name.clone(), self.children.len());
        self.children.push(child);
        self
    }

    /// By-value form of [`add_value`](Self::add_value), for building nodes inline.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_value(name, value);
        self
    }

    /// By-value form of [`add_child`](Self::add_child).
    pub fn with_child(mut self, child: ParamTree) -> Self {
        self.add_child(child);
        self
    }

    /// Returns the last child registered under `name`.
    pub fn get_child(&self, name: &str) -> Option<&ParamTree> {
        self.index.get(name).map(|&pos| &self.children[pos])
    }

    /// All children in insertion order, duplicates included.
    pub fn children(&self) -> &[ParamTree] {
        &self.children
    }

    pub fn has_no_children(&self) -> bool {
        self.children.is_empty()
    }

    /// Walks `path` from this node, creating container nodes as needed, and
    /// upserts `value` at the final segment.
    pub fn put_path(&mut self, path: &[String], value: impl Into<String>) {
        let Some((last, parents)) = path.split_last() else {
            self.value = Some(value.into());
            return;
        };

        let mut node = self;
        for segment in parents {
            node = node.child_mut_or_insert(segment);
        }
        node.put_child(last.clone(), value);
    }

    /// Layers `overlay` on top of this tree.
    ///
    /// A child name that occurs exactly once on both sides, with children on
    /// both sides, is merged recursively. Any other name present in the overlay
    /// replaces every base entry of that name.
    pub fn merge(&mut self, overlay: ParamTree) {
        if overlay.value.is_some() {
            self.value = overlay.value;
        }

        let mut pending: Vec<(String, Vec<ParamTree>)> = Vec::new();
        for child in overlay.children {
            match pending.iter_mut().find(|(name, _)| *name == child.name) {
                Some((_, group)) => group.push(child),
                None => pending.push((child.name.clone(), vec![child])),
            }
        }

        for (name, mut group) in pending {
            let mergeable = group.len() == 1
                && !group[0].has_no_children()
                && self.count_named(&name) == 1
                && self.get_child(&name).is_some_and(|c| !c.has_no_children());

            if mergeable {
                if let (Some(&pos), Some(incoming)) = (self.index.get(&name), group.pop()) {
                    self.children[pos].merge(incoming);
                }
                continue;
            }

            self.remove_named(&name);
            for child in group {
                self.add_child(child);
            }
        }
    }

    fn child_mut_or_insert(&mut self, name: &str) -> &mut ParamTree {
        let pos = match self.index.get(name) {
            Some(&pos) => pos,
            None => {
                self.add_child(Self::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    fn count_named(&self, name: &str) -> usize {
        self.children.iter().filter(|c| c.name == name).count()
    }

    fn remove_named(&mut self, name: &str) {
        if !self.index.contains_key(name) {
            return;
        }
        self.children.retain(|c| c.name != name);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, child) in self.children.iter().enumerate() {
            self.index.insert(child.name.clone(), pos);
        }
    }
}
