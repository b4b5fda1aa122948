//! Field state records.
//!
//! A record is stored in the field-state tree as a map node. Child field
//! records of the same node live next to the record's own keys.

use form_model_path::{get, parse_model_path, Tree, TreeMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const FOCUS: &str = "focus";
pub const BLUR: &str = "blur";
pub const PRISTINE: &str = "pristine";
pub const DIRTY: &str = "dirty";
pub const TOUCHED: &str = "touched";
pub const UNTOUCHED: &str = "untouched";
pub const VALIDITY: &str = "validity";
pub const ERRORS: &str = "errors";

const FLAGS: [&str; 6] = [FOCUS, BLUR, PRISTINE, DIRTY, TOUCHED, UNTOUCHED];

/// Validity of a field: one flag, or one flag per named validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Validity {
    Flag(bool),
    Keyed(IndexMap<String, bool>),
}

impl Validity {
    /// Reads a validity out of a tree node. Map values are coerced by
    /// truthiness; other shapes are not a validity.
    pub fn from_tree(node: &Tree) -> Option<Self> {
        match node {
            Tree::Bool(b) => Some(Validity::Flag(*b)),
            Tree::Map(map) => Some(Validity::Keyed(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.is_truthy()))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Validity::Flag(valid) => *valid,
            Validity::Keyed(map) => map.values().all(|valid| *valid),
        }
    }

    /// The matching error shape: each flag inverted.
    pub fn errors(&self) -> Validity {
        match self {
            Validity::Flag(valid) => Validity::Flag(!valid),
            Validity::Keyed(map) => {
                Validity::Keyed(map.iter().map(|(k, v)| (k.clone(), !v)).collect())
            }
        }
    }

    pub fn to_tree(&self) -> Tree {
        match self {
            Validity::Flag(valid) => Tree::Bool(*valid),
            Validity::Keyed(map) => {
                Tree::from_entries(map.iter().map(|(k, v)| (k.clone(), Tree::Bool(*v))))
            }
        }
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        Validity::Flag(valid)
    }
}

/// Whether `node`, stored under `key` of a record map, is the record's own
/// entry rather than the node of a child field that happens to share the
/// key's name.
///
/// Flags are scalars, so a container under a flag key belongs to a child.
/// `validity` and `errors` may be maps themselves; such a map belongs to a
/// child when it holds containers or carries every record flag.
pub fn is_own_entry(key: &str, node: &Tree) -> bool {
    let shaped = key == VALIDITY || key == ERRORS;
    if !shaped && !FLAGS.contains(&key) {
        return false;
    }
    match node {
        Tree::Map(map) if shaped => {
            let nested = map.values().any(|v| v.is_map() || v.is_seq());
            let record = FLAGS.iter().all(|flag| map.contains_key(*flag));
            !nested && !record
        }
        Tree::Map(_) | Tree::Seq(_) => shaped,
        _ => true,
    }
}

/// Typed view of a field state record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldState {
    pub focus: bool,
    pub blur: bool,
    pub pristine: bool,
    pub dirty: bool,
    pub touched: bool,
    pub untouched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<Validity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Validity>,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            focus: false,
            blur: true,
            pristine: true,
            dirty: false,
            touched: false,
            untouched: true,
            validity: None,
            errors: None,
        }
    }
}

impl FieldState {
    /// Reads a record out of a tree node; anything missing falls back to the
    /// default record. Entries that belong to a child field of the same name
    /// count as missing.
    pub fn from_tree(node: &Tree) -> Self {
        let defaults = Self::default();
        let Some(map) = node.as_map() else {
            return defaults;
        };
        let own = |key: &str| map.get(key).filter(|node| is_own_entry(key, node));
        let flag = |key: &str, default: bool| own(key).and_then(Tree::as_bool).unwrap_or(default);

        Self {
            focus: flag(FOCUS, defaults.focus),
            blur: flag(BLUR, defaults.blur),
            pristine: flag(PRISTINE, defaults.pristine),
            dirty: flag(DIRTY, defaults.dirty),
            touched: flag(TOUCHED, defaults.touched),
            untouched: flag(UNTOUCHED, defaults.untouched),
            validity: own(VALIDITY).and_then(Validity::from_tree),
            errors: own(ERRORS).and_then(Validity::from_tree),
        }
    }

    /// Valid unless a stored validity says otherwise.
    pub fn is_valid(&self) -> bool {
        self.validity.as_ref().map_or(true, Validity::is_valid)
    }
}

/// The default record as map entries.
pub fn default_entries() -> TreeMap {
    let d = FieldState::default();
    [
        (FOCUS, d.focus),
        (BLUR, d.blur),
        (PRISTINE, d.pristine),
        (DIRTY, d.dirty),
        (TOUCHED, d.touched),
        (UNTOUCHED, d.untouched),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), Tree::Bool(v)))
    .collect()
}

/// The default record as a tree node.
pub fn default_record() -> Tree {
    Tree::from(default_entries())
}

/// Reads the record at `model`, defaulting when nothing is stored yet.
pub fn get_field(fields: &Tree, model: &str) -> FieldState {
    get(fields, &parse_model_path(model))
        .map(FieldState::from_tree)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record() {
        assert_eq!(
            default_record().to_value(),
            json!({
                "focus": false,
                "blur": true,
                "pristine": true,
                "dirty": false,
                "touched": false,
                "untouched": true
            })
        );
        assert_eq!(FieldState::from_tree(&default_record()), FieldState::default());
    }

    #[test]
    fn test_from_tree_partial() {
        let node = Tree::from(json!({"focus": true, "child": {"focus": false}}));
        let state = FieldState::from_tree(&node);
        assert!(state.focus);
        assert!(state.blur);
        assert!(state.pristine);
    }

    #[test]
    fn test_own_entries() {
        let child = default_record();
        assert!(is_own_entry(BLUR, &Tree::Bool(true)));
        assert!(!is_own_entry(BLUR, &child));
        assert!(!is_own_entry("name", &child));
        assert!(is_own_entry(ERRORS, &Tree::from(json!({"required": true}))));
        assert!(is_own_entry(ERRORS, &Tree::from(json!([null, "short"]))));
        assert!(!is_own_entry(ERRORS, &child));
        assert!(!is_own_entry(VALIDITY, &Tree::from(json!({"x": {"touched": true}}))));
    }

    #[test]
    fn test_from_tree_skips_child_named_like_a_flag() {
        let node = Tree::from(json!({
            "focus": true,
            "touched": {"touched": true},
            "errors": {"focus": false, "blur": true, "pristine": true,
                       "dirty": false, "touched": false, "untouched": true}
        }));
        let state = FieldState::from_tree(&node);
        assert!(state.focus);
        assert!(!state.touched);
        assert_eq!(state.errors, None);
    }

    #[test]
    fn test_from_tree_non_map() {
        assert_eq!(FieldState::from_tree(&Tree::from(5i64)), FieldState::default());
    }

    #[test]
    fn test_validity() {
        let keyed = Validity::Keyed(
            [("required".to_string(), true), ("email".to_string(), false)]
                .into_iter()
                .collect(),
        );
        assert!(!keyed.is_valid());
        assert_eq!(
            keyed.errors().to_tree().to_value(),
            json!({"required": false, "email": true})
        );
        assert_eq!(Validity::from_tree(&keyed.to_tree()), Some(keyed));
        assert_eq!(Validity::from_tree(&Tree::from("x")), None);
        assert!(Validity::from(true).is_valid());
    }

    #[test]
    fn test_validity_serde_untagged() {
        let flag: Validity = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(flag, Validity::Flag(false));
        let keyed: Validity = serde_json::from_value(json!({"min": true})).unwrap();
        assert!(keyed.is_valid());
    }

    #[test]
    fn test_get_field_defaults() {
        let fields = Tree::from(json!({"user": {"name": {"touched": true}}}));
        assert!(get_field(&fields, "user.name").touched);
        assert_eq!(get_field(&fields, "user.email"), FieldState::default());
    }

    #[test]
    fn test_field_state_serde() {
        let state: FieldState = serde_json::from_value(json!({"dirty": true})).unwrap();
        assert!(state.dirty);
        assert!(state.untouched);
        let out = serde_json::to_value(&state).unwrap();
        assert!(out.get("validity").is_none());
    }
}
