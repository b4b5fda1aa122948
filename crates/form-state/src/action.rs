//! Actions dispatched to the model and field reducers.
//!
//! On the wire an action is a tagged record:
//!
//! ```json
//! {"type": "change", "model": "user.tags", "value": "admin", "multi": true}
//! ```
//!
//! Unknown `type` strings survive as [`ActionKind::Other`] so that a field
//! reducer can apply its reset fallback to them.

use std::fmt;

use form_model_path::Tree;
use serde::{Deserialize, Serialize};

use crate::field::Validity;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Change,
    Focus,
    Blur,
    SetDirty,
    SetPristine,
    SetTouched,
    SetUntouched,
    SetValidity,
    Reset,
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Change => "change",
            ActionKind::Focus => "focus",
            ActionKind::Blur => "blur",
            ActionKind::SetDirty => "setDirty",
            ActionKind::SetPristine => "setPristine",
            ActionKind::SetTouched => "setTouched",
            ActionKind::SetUntouched => "setUntouched",
            ActionKind::SetValidity => "setValidity",
            ActionKind::Reset => "reset",
            ActionKind::Other(name) => name,
        }
    }
}

impl From<&str> for ActionKind {
    fn from(name: &str) -> Self {
        match name {
            "change" => ActionKind::Change,
            "focus" => ActionKind::Focus,
            "blur" => ActionKind::Blur,
            "setDirty" => ActionKind::SetDirty,
            "setPristine" => ActionKind::SetPristine,
            "setTouched" => ActionKind::SetTouched,
            "setUntouched" => ActionKind::SetUntouched,
            "setValidity" => ActionKind::SetValidity,
            "reset" => ActionKind::Reset,
            other => ActionKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ActionKind {
    fn from(name: String) -> Self {
        ActionKind::from(name.as_str())
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action addressed to a model path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub model: String,
    #[serde(default, skip_serializing_if = "Tree::is_null")]
    pub value: Tree,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi: bool,
}

impl Action {
    pub fn new(kind: impl Into<ActionKind>, model: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            model: model.into(),
            value: Tree::Null,
            multi: false,
        }
    }

    /// Write `value` at `model`.
    pub fn change(model: impl Into<String>, value: impl Into<Tree>) -> Self {
        Self {
            value: value.into(),
            ..Self::new(ActionKind::Change, model)
        }
    }

    /// Toggle `value` in the collection at `model` (multi-select).
    pub fn toggle(model: impl Into<String>, value: impl Into<Tree>) -> Self {
        Self {
            multi: true,
            ..Self::change(model, value)
        }
    }

    pub fn focus(model: impl Into<String>) -> Self {
        Self::new(ActionKind::Focus, model)
    }

    pub fn blur(model: impl Into<String>) -> Self {
        Self::new(ActionKind::Blur, model)
    }

    pub fn set_dirty(model: impl Into<String>) -> Self {
        Self::new(ActionKind::SetDirty, model)
    }

    pub fn set_pristine(model: impl Into<String>) -> Self {
        Self::new(ActionKind::SetPristine, model)
    }

    pub fn set_touched(model: impl Into<String>) -> Self {
        Self::new(ActionKind::SetTouched, model)
    }

    pub fn set_untouched(model: impl Into<String>) -> Self {
        Self::new(ActionKind::SetUntouched, model)
    }

    pub fn set_validity(model: impl Into<String>, validity: Validity) -> Self {
        Self {
            value: validity.to_tree(),
            ..Self::new(ActionKind::SetValidity, model)
        }
    }

    pub fn reset(model: impl Into<String>) -> Self {
        Self::new(ActionKind::Reset, model)
    }

    /// Same action, retargeted at another model path.
    pub fn with_model(self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in [
            ActionKind::Change,
            ActionKind::Focus,
            ActionKind::Blur,
            ActionKind::SetDirty,
            ActionKind::SetPristine,
            ActionKind::SetTouched,
            ActionKind::SetUntouched,
            ActionKind::SetValidity,
            ActionKind::Reset,
        ] {
            assert_eq!(ActionKind::from(kind.as_str()), kind);
        }
        assert_eq!(
            ActionKind::from("load"),
            ActionKind::Other("load".to_string())
        );
    }

    #[test]
    fn test_deserialize_change() {
        let action: Action = serde_json::from_value(json!({
            "type": "change",
            "model": "user.tags",
            "value": "admin",
            "multi": true
        }))
        .unwrap();
        assert_eq!(action, Action::toggle("user.tags", "admin"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let action: Action =
            serde_json::from_value(json!({"type": "blur", "model": "a"})).unwrap();
        assert_eq!(action, Action::blur("a"));
        assert!(!action.multi);
        assert!(action.value.is_null());
    }

    #[test]
    fn test_unknown_kind_roundtrips() {
        let raw = json!({"type": "rrf/load", "model": "a.b"});
        let action: Action = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(action.kind, ActionKind::Other("rrf/load".to_string()));
        assert_eq!(serde_json::to_value(&action).unwrap(), raw);
    }

    #[test]
    fn test_serialize_skips_defaults() {
        let out = serde_json::to_value(Action::focus("name")).unwrap();
        assert_eq!(out, json!({"type": "focus", "model": "name"}));

        let out = serde_json::to_value(Action::toggle("tags", 3i64)).unwrap();
        assert_eq!(
            out,
            json!({"type": "change", "model": "tags", "value": 3, "multi": true})
        );
    }

    #[test]
    fn test_with_model() {
        let action = Action::change("groups[].name", "x").with_model("groups.1.name");
        assert_eq!(action.model, "groups.1.name");
        assert_eq!(action.value, Tree::from("x"));
    }
}
