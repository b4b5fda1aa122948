//! Copy-on-write writes.
//!
//! Only the containers on the root-to-target spine are rebuilt. Every other
//! subtree of the input is shared with the output.

use std::sync::Arc;

use crate::get::get;
use crate::parse::parse_model_path;
use crate::tree::{Tree, TreeMap};
use crate::types::Segment;

/// Largest run of `null`s a single write may add to a sequence.
pub const MAX_SEQ_GAP: usize = 1024;

/// Whether writing at `index` keeps a sequence of `len` items a sequence.
fn pads_within(len: usize, index: usize) -> bool {
    index <= len.saturating_add(MAX_SEQ_GAP)
}

/// Write `value` at `path`, returning the new tree.
///
/// - Missing intermediates are created: a sequence when the segment that
///   addresses into the new container is an index, a map otherwise.
/// - Writing past the end of a sequence pads it with `null` up to the index,
///   adding at most [`MAX_SEQ_GAP`] nulls. An index further out is written
///   as a map key, turning the sequence into a map keyed by the former
///   positions; a fresh container for such an index is a map.
/// - A scalar in the way is replaced by a fresh container.
/// - A non-index key written into a sequence turns it into a map keyed by
///   the former positions.
/// - A path holding a wildcard is not writable; the input is returned as is.
///
/// # Example
///
/// ```
/// use form_model_path::{set, get, parse_model_path, Tree};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"a": {"b": 1}, "c": {"d": 2}}));
/// let next = set(&tree, &parse_model_path("a.b"), Tree::from(5i64));
///
/// assert_eq!(next.to_value(), json!({"a": {"b": 5}, "c": {"d": 2}}));
/// let before = get(&tree, &parse_model_path("c")).unwrap();
/// let after = get(&next, &parse_model_path("c")).unwrap();
/// assert!(before.same(after));
/// ```
pub fn set(tree: &Tree, path: &[Segment], value: Tree) -> Tree {
    if path.iter().any(Segment::is_wildcard) {
        return tree.clone();
    }
    set_at(tree, path, value)
}

/// Write by model path string.
pub fn set_by_model(tree: &Tree, model: &str, value: Tree) -> Tree {
    set(tree, &parse_model_path(model), value)
}

/// Replace the value at `path` with `f(current)`.
///
/// `f` receives `None` when nothing is stored at `path`.
pub fn update<F>(tree: &Tree, path: &[Segment], f: F) -> Tree
where
    F: FnOnce(Option<&Tree>) -> Tree,
{
    if path.iter().any(Segment::is_wildcard) {
        return tree.clone();
    }
    let next = f(get(tree, path));
    set_at(tree, path, next)
}

fn set_at(tree: &Tree, path: &[Segment], value: Tree) -> Tree {
    let Some((head, rest)) = path.split_first() else {
        return value;
    };

    match tree {
        Tree::Map(map) => {
            let key = head.as_key().map(|k| k.into_owned()).unwrap_or_default();
            let child = map.get(&key).unwrap_or(&Tree::Null);
            let next = set_at(child, rest, value);
            let mut copy = TreeMap::clone(map);
            copy.insert(key, next);
            Tree::Map(Arc::new(copy))
        }
        Tree::Seq(items) => match head.as_index().filter(|&i| pads_within(items.len(), i)) {
            Some(index) => {
                let child = items.get(index).unwrap_or(&Tree::Null);
                let next = set_at(child, rest, value);
                let mut copy = Vec::clone(items);
                if index >= copy.len() {
                    copy.resize(index + 1, Tree::Null);
                }
                copy[index] = next;
                Tree::Seq(Arc::new(copy))
            }
            None => {
                let keyed: TreeMap = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item.clone()))
                    .collect();
                set_at(&Tree::from(keyed), path, value)
            }
        },
        _ => {
            let fresh = if head.as_index().is_some_and(|i| pads_within(0, i)) {
                Tree::empty_seq()
            } else {
                Tree::empty_map()
            };
            set_at(&fresh, path, value)
        }
    }
}
