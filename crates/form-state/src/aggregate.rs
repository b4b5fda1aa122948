//! Touched and validity aggregation over field-state trees.
//!
//! Two node layouts are read:
//!
//! - a field node, whose own keys are the record (`touched`, `errors`, ...),
//!   including the legacy flat layout that carries `touched` / `valid`
//!   booleans directly;
//! - a form node, marked by a `$form` key, whose other keys are child nodes.
//!
//! Nothing is cached; every call walks the tree again.

use form_model_path::{Tree, TreeMap};

use crate::field::{is_own_entry, ERRORS, TOUCHED};

/// Marker key of a form-aggregate node.
pub const FORM_MARKER: &str = "$form";

/// Flat-layout validity flag.
pub const VALID: &str = "valid";

/// The layout of a field-state node.
#[derive(Debug, Clone, Copy)]
pub enum NodeShape<'a> {
    /// A node with a `$form` marker.
    Form(&'a TreeMap),
    /// A record node without the marker.
    Field(&'a TreeMap),
    /// A sequence of child nodes.
    Collection(&'a [Tree]),
    Scalar(&'a Tree),
}

impl<'a> NodeShape<'a> {
    pub fn of(node: &'a Tree) -> Self {
        match node {
            Tree::Map(map) if map.contains_key(FORM_MARKER) => NodeShape::Form(map),
            Tree::Map(map) => NodeShape::Field(map),
            Tree::Seq(items) => NodeShape::Collection(items),
            other => NodeShape::Scalar(other),
        }
    }
}

fn form_children(map: &TreeMap) -> impl Iterator<Item = &Tree> {
    map.iter()
        .filter(|(key, _)| key.as_str() != FORM_MARKER)
        .map(|(_, child)| child)
}

/// Whether the node, or for a form node any of its children, is touched.
///
/// An absent node is untouched.
pub fn is_touched(node: Option<&Tree>) -> bool {
    let Some(node) = node else {
        return false;
    };
    if let Some(touched) = node.get_key(TOUCHED).and_then(Tree::as_bool) {
        return touched;
    }

    match NodeShape::of(node) {
        NodeShape::Form(map) => form_children(map).any(|child| is_touched(Some(child))),
        NodeShape::Collection(items) => items.iter().any(|child| is_touched(Some(child))),
        NodeShape::Field(map) => map
            .get(TOUCHED)
            .is_some_and(|node| is_own_entry(TOUCHED, node) && node.is_truthy()),
        NodeShape::Scalar(_) => false,
    }
}

/// Whether the node, or for a form node every one of its children, is
/// valid.
///
/// An absent node is valid. A field node is valid when its `errors` is
/// falsy, or, for keyed or listed errors, when every entry is falsy.
pub fn is_valid(node: Option<&Tree>) -> bool {
    let Some(node) = node else {
        return true;
    };
    if let Some(valid) = node.get_key(VALID).and_then(Tree::as_bool) {
        return valid;
    }

    match NodeShape::of(node) {
        NodeShape::Form(map) => form_children(map).all(|child| is_valid(Some(child))),
        NodeShape::Collection(items) => items.iter().all(|child| is_valid(Some(child))),
        NodeShape::Field(map) => {
            errors_are_clear(map.get(ERRORS).filter(|node| is_own_entry(ERRORS, node)))
        }
        NodeShape::Scalar(_) => true,
    }
}

fn errors_are_clear(errors: Option<&Tree>) -> bool {
    match errors {
        None => true,
        Some(Tree::Map(entries)) => entries.values().all(|e| !e.is_truthy()),
        Some(Tree::Seq(entries)) => entries.iter().all(|e| !e.is_truthy()),
        Some(flag) => !flag.is_truthy(),
    }
}
