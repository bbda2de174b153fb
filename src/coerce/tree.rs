use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use url::Url;

use super::scalar::{self, DEFAULT_DATE_FORMATS};
use super::style::{Color, Font};
use super::{CoercionError, PathNormalizer, SystemSeparators};
use crate::tree::ParamTree;

/// What a coercion reads from: a tree node or a raw literal.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Node(&'a ParamTree),
    Text(&'a str),
}

impl<'a> Input<'a> {
    /// The node's value, or the literal itself.
    pub fn scalar(&self) -> Option<&'a str> {
        match *self {
            Input::Node(node) => node.value(),
            Input::Text(text) => Some(text),
        }
    }
}

impl<'a> From<&'a ParamTree> for Input<'a> {
    fn from(node: &'a ParamTree) -> Self {
        Input::Node(node)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

/// Coerces [`Input`]s into typed values.
///
/// Scalar targets read the node's value; a node without one yields `None`
/// (strings yield an empty string instead). List, array and map targets read
/// a node's children, or split a literal the way [`scalar`] does.
#[derive(Debug, Clone)]
pub struct Coercer {
    date_formats: Vec<String>,
    normalizer: Arc<dyn PathNormalizer>,
}

impl Default for Coercer {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            normalizer: Arc::new(SystemSeparators),
        }
    }
}

impl Coercer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the ordered list of date formats.
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_path_normalizer(mut self, normalizer: impl PathNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    pub fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    pub fn string(&self, input: Input<'_>) -> String {
        input.scalar().unwrap_or_default().to_string()
    }

    pub fn int(&self, input: Input<'_>) -> Result<Option<i32>, CoercionError> {
        input.scalar().map(scalar::parse_int).transpose()
    }

    pub fn long(&self, input: Input<'_>) -> Result<Option<i64>, CoercionError> {
        input.scalar().map(scalar::parse_long).transpose()
    }

    pub fn float(&self, input: Input<'_>) -> Result<Option<f32>, CoercionError> {
        input.scalar().map(scalar::parse_float).transpose()
    }

    pub fn double(&self, input: Input<'_>) -> Result<Option<f64>, CoercionError> {
        input.scalar().map(scalar::parse_double).transpose()
    }

    pub fn boolean(&self, input: Input<'_>) -> Option<bool> {
        input.scalar().map(scalar::parse_bool)
    }

    pub fn date(&self, input: Input<'_>) -> Result<Option<NaiveDateTime>, CoercionError> {
        input
            .scalar()
            .map(|raw| scalar::parse_date_with(self.date_formats.as_slice(), raw))
            .transpose()
    }

    pub fn file(&self, input: Input<'_>) -> Option<PathBuf> {
        input
            .scalar()
            .map(|raw| scalar::parse_file(raw, self.normalizer.as_ref()))
    }

    pub fn url(&self, input: Input<'_>) -> Result<Option<Url>, CoercionError> {
        input.scalar().map(scalar::parse_url).transpose()
    }

    pub fn color(&self, input: Input<'_>) -> Result<Option<Color>, CoercionError> {
        input.scalar().map(scalar::parse_color).transpose()
    }

    pub fn font(&self, input: Input<'_>) -> Option<Font> {
        input.scalar().map(scalar::parse_font)
    }

    /// Children's values in order, duplicates kept.
    pub fn list(&self, input: Input<'_>) -> Result<Vec<String>, CoercionError> {
        match input {
            Input::Node(node) => children_of(node)?.iter().map(child_value).collect(),
            Input::Text(text) => Ok(scalar::parse_list(text)),
        }
    }

    pub fn array(&self, input: Input<'_>) -> Result<Box<[String]>, CoercionError> {
        match input {
            Input::Node(_) => self.list(input).map(Vec::into_boxed_slice),
            Input::Text(text) => Ok(scalar::parse_array(text)),
        }
    }

    /// Children's names mapped to their values; later siblings win.
    pub fn map(&self, input: Input<'_>) -> Result<HashMap<String, String>, CoercionError> {
        match input {
            Input::Node(node) => children_of(node)?
                .iter()
                .map(|child| child_value(child).map(|value| (child.name().to_string(), value)))
                .collect(),
            Input::Text(text) => Ok(scalar::parse_map(text)),
        }
    }
}

fn children_of(node: &ParamTree) -> Result<&[ParamTree], CoercionError> {
    if node.has_no_children() {
        return Err(CoercionError::EmptyContainer {
            name: node.name().to_string(),
        });
    }
    Ok(node.children())
}

fn child_value(child: &ParamTree) -> Result<String, CoercionError> {
    child
        .value()
        .map(str::to_string)
        .ok_or_else(|| CoercionError::NestedContainer {
            name: child.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::CoercionKind;

    #[derive(Debug)]
    struct Uppercase;

    impl PathNormalizer for Uppercase {
        fn normalize(&self, raw: &str) -> String {
            raw.to_uppercase()
        }
    }

    fn list_node() -> ParamTree {
        ParamTree::new("testList")
            .with_value("param", "Rust")
            .with_value("param", "Rocks!")
            .with_value("param", "Like")
            .with_value("param", "hell")
    }

    #[test]
    fn test_scalar_from_node_and_text() {
        let coercer = Coercer::new();
        let node = ParamTree::leaf("n", "42");

        assert_eq!(coercer.int(Input::Node(&node)).unwrap(), Some(42));
        assert_eq!(coercer.long("42".into()).unwrap(), Some(42));
        assert_eq!(coercer.boolean("TRUE".into()), Some(true));
        assert_eq!(coercer.string(Input::Node(&node)), "42");
    }

    #[test]
    fn test_valueless_node_is_absent() {
        let coercer = Coercer::new();
        let node = ParamTree::new("empty");

        assert_eq!(coercer.int(Input::Node(&node)).unwrap(), None);
        assert_eq!(coercer.date(Input::Node(&node)).unwrap(), None);
        assert_eq!(coercer.boolean(Input::Node(&node)), None);
        assert_eq!(coercer.file(Input::Node(&node)), None);
        assert_eq!(coercer.string(Input::Node(&node)), "");
    }

    #[test]
    fn test_list_preserves_order_and_duplicates() {
        let coercer = Coercer::new();
        let node = list_node().with_value("param", "Rust");

        let list = coercer.list(Input::Node(&node)).unwrap();
        assert_eq!(list, ["Rust", "Rocks!", "Like", "hell", "Rust"]);
    }

    #[test]
    fn test_array_from_node() {
        let coercer = Coercer::new();
        let node = list_node();

        let array = coercer.array(Input::Node(&node)).unwrap();
        assert_eq!(&*array, ["Rust", "Rocks!", "Like", "hell"]);
    }

    #[test]
    fn test_list_from_text_splits() {
        let coercer = Coercer::new();
        assert_eq!(coercer.list("joe,dan,mike".into()).unwrap(), ["joe", "dan", "mike"]);
        assert_eq!(&*coercer.array("joe,dan".into()).unwrap(), ["joe", "dan"]);
    }

    #[test]
    fn test_list_rejects_leaf_node() {
        let coercer = Coercer::new();
        let node = ParamTree::leaf("testList", "Rust");

        let err = coercer.list(Input::Node(&node)).unwrap_err();
        assert_eq!(err.kind(), CoercionKind::EmptyContainer);
        assert!(err.is_container_fault());
        assert!(coercer.array(Input::Node(&node)).is_err());
    }

    #[test]
    fn test_list_rejects_nested_container() {
        let coercer = Coercer::new();
        let node = ParamTree::new("outer").with_child(ParamTree::new("inner").with_value("x", "1"));

        let err = coercer.list(Input::Node(&node)).unwrap_err();
        assert_eq!(err.kind(), CoercionKind::NestedContainer);
    }

    #[test]
    fn test_map_from_node() {
        let coercer = Coercer::new();
        let node = ParamTree::new("testMap")
            .with_value("key1", "joe")
            .with_value("key2", "dan")
            .with_value("key3", "mike");

        let map = coercer.map(Input::Node(&node)).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["key1"], "joe");
        assert_eq!(map["key2"], "dan");
        assert_eq!(map["key3"], "mike");
    }

    #[test]
    fn test_map_sibling_collision_last_wins() {
        let coercer = Coercer::new();
        let node = ParamTree::new("m").with_value("k", "first").with_value("k", "second");

        let map = coercer.map(Input::Node(&node)).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["k"], "second");
    }

    #[test]
    fn test_map_rejects_childless_node() {
        let coercer = Coercer::new();
        let err = coercer.map(Input::Node(&ParamTree::new("m"))).unwrap_err();
        assert!(matches!(err, CoercionError::EmptyContainer { ref name } if name == "m"));
    }

    #[test]
    fn test_map_from_text() {
        let coercer = Coercer::new();
        let map = coercer.map("key1=joe,key2=dan".into()).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_custom_date_formats_and_normalizer() {
        let coercer = Coercer::new()
            .with_date_formats(["%d/%m/%Y"])
            .with_path_normalizer(Uppercase);

        let date = coercer.date("06/10/2005".into()).unwrap().unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2005-10-06");
        assert!(coercer.date("2005-10-06".into()).is_err());
        assert_eq!(coercer.file("a/b".into()), Some(PathBuf::from("A/B")));
    }
}
