//! Collection tracking.
//!
//! A track pattern such as `groups[].name` names a field inside "whichever
//! element of `groups` matches". [`Track::resolve`] looks the element up in
//! the current data and produces the concrete path, e.g. `groups.1.name`.

use std::fmt;
use std::sync::Arc;

use form_model_path::{format_model_path, get, parse_model_path, strip_prefix, Path, Segment, Tree};

use crate::error::TrackError;

/// Predicate over `(element, key, collection)`.
pub type PredicateFn = dyn Fn(&Tree, &str, &Tree) -> bool + Send + Sync;

/// Selects the tracked element of a collection.
#[derive(Clone)]
pub enum Predicate {
    Fn(Arc<PredicateFn>),
    /// Partial deep equality against the given pattern.
    Matches(Tree),
}

impl Predicate {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Tree, &str, &Tree) -> bool + Send + Sync + 'static,
    {
        Predicate::Fn(Arc::new(f))
    }

    pub fn matches(pattern: impl Into<Tree>) -> Self {
        Predicate::Matches(pattern.into())
    }

    pub fn test(&self, element: &Tree, key: &str, collection: &Tree) -> bool {
        match self {
            Predicate::Fn(f) => f(element, key, collection),
            Predicate::Matches(pattern) => is_match(element, pattern),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Fn(_) => f.write_str("Predicate::Fn(..)"),
            Predicate::Matches(pattern) => write!(f, "Predicate::Matches({pattern})"),
        }
    }
}

impl From<Tree> for Predicate {
    fn from(pattern: Tree) -> Self {
        Predicate::Matches(pattern)
    }
}

impl From<serde_json::Value> for Predicate {
    fn from(pattern: serde_json::Value) -> Self {
        Predicate::Matches(Tree::from(pattern))
    }
}

/// Partial deep equality.
///
/// Maps match when every key of `pattern` matches in `value`; sequences
/// match when every element of `pattern` matches some element of `value`;
/// everything else compares by value.
pub fn is_match(value: &Tree, pattern: &Tree) -> bool {
    match (value, pattern) {
        (Tree::Map(value), Tree::Map(pattern)) => pattern
            .iter()
            .all(|(key, p)| value.get(key).is_some_and(|v| is_match(v, p))),
        (Tree::Seq(value), Tree::Seq(pattern)) => pattern
            .iter()
            .all(|p| value.iter().any(|v| is_match(v, p))),
        (value, pattern) => value == pattern,
    }
}

/// A parsed track pattern.
#[derive(Debug, Clone)]
pub struct Track {
    parent: Path,
    predicate: Predicate,
    suffix: Path,
}

/// Builds a [`Track`] from a pattern holding exactly one wildcard segment
/// (`[]`, or `[ ]`). Quoted keys are parsed as keys, so `["a[]"]` is not a
/// wildcard.
///
/// # Example
///
/// ```
/// use form_state::track;
/// use form_model_path::Tree;
/// use serde_json::json;
///
/// let state = Tree::from(json!({
///     "groups": [{"id": 5, "name": "A"}, {"id": 6, "name": "B"}]
/// }));
/// let name_of_six = track("groups[].name", json!({"id": 6})).unwrap();
/// assert_eq!(name_of_six.resolve(&state), "groups.1.name");
/// ```
pub fn track(pattern: &str, predicate: impl Into<Predicate>) -> Result<Track, TrackError> {
    let path = parse_model_path(pattern);
    let mut wildcards = path
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.is_wildcard())
        .map(|(at, _)| at);
    let Some(at) = wildcards.next() else {
        return Err(TrackError::MissingWildcard(pattern.to_string()));
    };
    if wildcards.next().is_some() {
        return Err(TrackError::MultipleWildcards(pattern.to_string()));
    }

    Ok(Track {
        parent: path[..at].to_vec(),
        predicate: predicate.into(),
        suffix: path[at + 1..].to_vec(),
    })
}

impl Track {
    /// The model path of the tracked collection.
    pub fn parent(&self) -> String {
        format_model_path(&self.parent)
    }

    /// The model path below the tracked element.
    pub fn suffix(&self) -> String {
        format_model_path(&self.suffix)
    }

    /// The key or index of the first matching element, if any.
    pub fn find_key(&self, collection: &Tree) -> Option<String> {
        match collection {
            Tree::Seq(items) => items.iter().enumerate().find_map(|(index, item)| {
                let key = index.to_string();
                self.predicate.test(item, &key, collection).then_some(key)
            }),
            Tree::Map(map) => map
                .iter()
                .find(|(key, item)| self.predicate.test(item, key, collection))
                .map(|(key, _)| key.clone()),
            _ => None,
        }
    }

    /// Concrete model path for `data`.
    ///
    /// When no element matches, the key is left out of the joined path, so
    /// the result names no current element.
    pub fn resolve(&self, data: &Tree) -> String {
        self.resolve_in(data, &[])
    }

    /// Like [`Track::resolve`], for data held under `scope`: `data` is the
    /// subtree at `scope` while the pattern and the result stay full paths.
    pub fn resolve_in(&self, data: &Tree, scope: &[Segment]) -> String {
        let key = strip_prefix(&self.parent, scope)
            .and_then(|relative| get(data, relative))
            .and_then(|collection| self.find_key(collection));

        let mut path = self.parent.clone();
        path.extend(key.map(Segment::Key));
        path.extend(self.suffix.iter().cloned());
        format_model_path(&path)
    }
}
