//! Model path utilities.
//!
//! A model path addresses a node in a nested data tree: `.`-separated
//! property names plus bracketed positions, e.g. `user.groups[2].name`. The
//! unresolved form `user.groups[].name` carries a wildcard that has to be
//! resolved to a position before it can be read or written.
//!
//! Data lives in [`Tree`], a persistent JSON-like value. [`set`] rebuilds only
//! the containers between the root and the written node, so every untouched
//! subtree of the old tree is shared by reference with the new one.
//!
//! # Example
//!
//! ```
//! use form_model_path::{get_by_model, set_by_model, Tree};
//! use serde_json::json;
//!
//! let doc = Tree::from(json!({"user": {"groups": [{"name": "A"}]}}));
//! let next = set_by_model(&doc, "user.groups[0].name", Tree::from("B"));
//!
//! assert_eq!(get_by_model(&next, "user.groups.0.name"), Some(&Tree::from("B")));
//! assert_eq!(get_by_model(&doc, "user.groups.0.name"), Some(&Tree::from("A")));
//! assert_eq!(get_by_model(&doc, "user.missing"), None);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, Segment};

pub mod tree;
pub use tree::{Tree, TreeMap};

mod parse;
pub use parse::{format_model_path, parse_model_path, parse_model_path_strict};

mod get;
pub use get::{get, get_by_model, get_or};

mod set;
pub use set::{set, set_by_model, update, MAX_SEQ_GAP};

mod util;
pub use util::{
    is_child, is_path_equal, is_root, is_valid_index, join_model_path, parent, starts_with,
    strip_prefix,
};

pub mod validate;
pub use validate::{validate_model_path, validate_path, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelPathError {
    #[error("NO_PARENT")]
    NoParent,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
