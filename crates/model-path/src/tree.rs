//! Persistent JSON-like tree.
//!
//! Containers are held behind [`Arc`], so cloning a [`Tree`] never copies
//! children. Writers build new spines with [`crate::set`] and share every
//! untouched subtree with the previous version.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};

/// Keyed children of a [`Tree::Map`], in insertion order.
pub type TreeMap = IndexMap<String, Tree>;

/// A node of a data tree or a field-state tree.
#[derive(Debug, Clone, Default)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Seq(Arc<Vec<Tree>>),
    Map(Arc<TreeMap>),
}

impl Tree {
    pub fn empty_map() -> Self {
        Tree::Map(Arc::new(TreeMap::new()))
    }

    pub fn empty_seq() -> Self {
        Tree::Seq(Arc::new(Vec::new()))
    }

    /// Builds a map node from key/value pairs.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Tree)>,
        K: Into<String>,
    {
        Tree::Map(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Builds a sequence node from items.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Tree>,
    {
        Tree::Seq(Arc::new(items.into_iter().collect()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Tree::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Tree::Map(_))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Tree::Seq(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Tree::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&TreeMap> {
        match self {
            Tree::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Tree]> {
        match self {
            Tree::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a direct child of a map node.
    pub fn get_key(&self, key: &str) -> Option<&Tree> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Reference identity for containers, value equality for scalars.
    ///
    /// Two states produced by copy-on-write writes share every subtree the
    /// write did not pass through, so `same` is the cheap change check
    /// downstream consumers rely on.
    pub fn same(&self, other: &Tree) -> bool {
        match (self, other) {
            (Tree::Seq(a), Tree::Seq(b)) => Arc::ptr_eq(a, b),
            (Tree::Map(a), Tree::Map(b)) => Arc::ptr_eq(a, b),
            (Tree::Seq(_), _) | (Tree::Map(_), _) => false,
            (_, Tree::Seq(_)) | (_, Tree::Map(_)) => false,
            (a, b) => a == b,
        }
    }

    /// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Tree::Null => false,
            Tree::Bool(b) => *b,
            Tree::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            Tree::String(s) => !s.is_empty(),
            Tree::Seq(_) | Tree::Map(_) => true,
        }
    }

    /// Deep-converts into a [`serde_json::Value`].
    pub fn to_value(&self) -> Value {
        match self {
            Tree::Null => Value::Null,
            Tree::Bool(b) => Value::Bool(*b),
            Tree::Number(n) => Value::Number(n.clone()),
            Tree::String(s) => Value::String(s.clone()),
            Tree::Seq(items) => Value::Array(items.iter().map(Tree::to_value).collect()),
            Tree::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tree::Null, Tree::Null) => true,
            (Tree::Bool(a), Tree::Bool(b)) => a == b,
            (Tree::Number(a), Tree::Number(b)) => {
                a == b || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
            }
            (Tree::String(a), Tree::String(b)) => a == b,
            (Tree::Seq(a), Tree::Seq(b)) => Arc::ptr_eq(a, b) || a == b,
            (Tree::Map(a), Tree::Map(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Tree::Null,
            Value::Bool(b) => Tree::Bool(b),
            Value::Number(n) => Tree::Number(n),
            Value::String(s) => Tree::String(s),
            Value::Array(items) => Tree::from_items(items.into_iter().map(Tree::from)),
            Value::Object(map) => Tree::from_entries(map.into_iter().map(|(k, v)| (k, Tree::from(v)))),
        }
    }
}

impl From<&Value> for Tree {
    fn from(value: &Value) -> Self {
        Tree::from(value.clone())
    }
}

impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        tree.to_value()
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Tree::Bool(b)
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Tree::String(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Tree::String(s)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Tree::Number(n.into())
    }
}

impl From<u64> for Tree {
    fn from(n: u64) -> Self {
        Tree::Number(n.into())
    }
}

impl From<f64> for Tree {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Tree::Number).unwrap_or(Tree::Null)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Tree::Seq(Arc::new(items))
    }
}

impl From<TreeMap> for Tree {
    fn from(map: TreeMap) -> Self {
        Tree::Map(Arc::new(map))
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tree::Null => serializer.serialize_unit(),
            Tree::Bool(b) => serializer.serialize_bool(*b),
            Tree::Number(n) => n.serialize(serializer),
            Tree::String(s) => serializer.serialize_str(s),
            Tree::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tree::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Tree::from)
    }
}
