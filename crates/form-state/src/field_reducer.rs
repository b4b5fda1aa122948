//! Field reducer.
//!
//! Keeps the field-state tree for one scope. Records are merged, never
//! replaced, except by `reset` and unknown action kinds, which restore the
//! default record.

use form_model_path::{parse_model_path, set, strip_prefix, update, Path, Segment, Tree};

use crate::action::{Action, ActionKind};
use crate::field::{
    default_entries, default_record, is_own_entry, Validity, BLUR, DIRTY, ERRORS, FOCUS,
    PRISTINE, TOUCHED, UNTOUCHED, VALIDITY,
};
use crate::store::Reducer;

/// Reducer for the field-state tree under a scope model path.
///
/// Actions whose model does not start with the scope are ignored. Paths in
/// the tree are relative to the scope: with scope `user`, the record for
/// `user.name` lives at `name`.
#[derive(Debug, Clone)]
pub struct FieldReducer {
    scope: Path,
    initial: Tree,
}

impl FieldReducer {
    pub fn new(scope: &str, initial: Tree) -> Self {
        Self {
            scope: parse_model_path(scope),
            initial,
        }
    }

    pub fn scope(&self) -> &[Segment] {
        &self.scope
    }
}

impl Default for FieldReducer {
    fn default() -> Self {
        Self::new("", Tree::empty_map())
    }
}

impl Reducer for FieldReducer {
    fn initial_state(&self) -> Tree {
        self.initial.clone()
    }

    fn reduce(&self, state: &Tree, action: &Action) -> Tree {
        let model = parse_model_path(&action.model);
        let Some(path) = strip_prefix(&model, &self.scope) else {
            return state.clone();
        };

        match &action.kind {
            ActionKind::Focus => merge_field(state, path, &[(FOCUS, true), (BLUR, false)]),
            // A blur counts as a touch.
            ActionKind::Blur => merge_field(
                state,
                path,
                &[
                    (FOCUS, false),
                    (BLUR, true),
                    (TOUCHED, true),
                    (UNTOUCHED, false),
                ],
            ),
            ActionKind::Change | ActionKind::SetDirty => {
                merge_field(state, path, &[(DIRTY, true), (PRISTINE, false)])
            }
            ActionKind::SetPristine => {
                merge_field(state, path, &[(DIRTY, false), (PRISTINE, true)])
            }
            ActionKind::SetTouched => {
                merge_field(state, path, &[(TOUCHED, true), (UNTOUCHED, false)])
            }
            ActionKind::SetUntouched => {
                merge_field(state, path, &[(TOUCHED, false), (UNTOUCHED, true)])
            }
            ActionKind::SetValidity => {
                let validity = Validity::from_tree(&action.value)
                    .unwrap_or_else(|| Validity::Flag(action.value.is_truthy()));
                merge_record(
                    state,
                    path,
                    [
                        (VALIDITY, validity.to_tree()),
                        (ERRORS, validity.errors().to_tree()),
                    ],
                )
            }
            ActionKind::Reset | ActionKind::Other(_) => set(state, path, default_record()),
        }
    }
}

/// Merges boolean flags over the record at `path`.
pub fn merge_field(state: &Tree, path: &[Segment], flags: &[(&str, bool)]) -> Tree {
    merge_record(
        state,
        path,
        flags.iter().map(|(key, flag)| (*key, Tree::Bool(*flag))),
    )
}

/// Default record, overlaid by whatever is stored at `path`, overlaid by
/// `partial`.
///
/// A partial entry whose key is taken by a child field's node is dropped;
/// the child keeps its node.
fn merge_record<'a, I>(state: &Tree, path: &[Segment], partial: I) -> Tree
where
    I: IntoIterator<Item = (&'a str, Tree)>,
{
    update(state, path, |prior| {
        let mut record = default_entries();
        match prior {
            Some(Tree::Map(prior)) => {
                for (key, value) in prior.iter() {
                    record.insert(key.clone(), value.clone());
                }
            }
            // Child records held by position keep their positions as keys.
            Some(Tree::Seq(items)) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_null() {
                        record.insert(index.to_string(), item.clone());
                    }
                }
            }
            _ => {}
        }
        for (key, value) in partial {
            if record.get(key).is_some_and(|prior| !is_own_entry(key, prior)) {
                continue;
            }
            record.insert(key.to_string(), value);
        }
        Tree::from(record)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{get_field, FieldState};
    use serde_json::json;

    fn reduce_all(reducer: &FieldReducer, actions: &[Action]) -> Tree {
        actions
            .iter()
            .fold(reducer.initial_state(), |state, action| reducer.reduce(&state, action))
    }

    #[test]
    fn test_focus() {
        let reducer = FieldReducer::default();
        let state = reducer.reduce(&reducer.initial_state(), &Action::focus("name"));
        let field = get_field(&state, "name");
        assert!(field.focus);
        assert!(!field.blur);
        assert!(field.pristine);
        assert!(field.untouched);
    }

    #[test]
    fn test_blur_touches() {
        let reducer = FieldReducer::default();
        let state = reduce_all(&reducer, &[Action::focus("name"), Action::blur("name")]);
        let field = get_field(&state, "name");
        assert!(!field.focus);
        assert!(field.blur);
        assert!(field.touched);
        assert!(!field.untouched);
    }

    #[test]
    fn test_change_and_set_dirty() {
        let reducer = FieldReducer::default();
        for action in [Action::change("a", 1i64), Action::set_dirty("a")] {
            let state = reducer.reduce(&Tree::empty_map(), &action);
            let field = get_field(&state, "a");
            assert!(field.dirty);
            assert!(!field.pristine);
        }
    }

    #[test]
    fn test_set_pristine_and_untouched() {
        let reducer = FieldReducer::default();
        let state = reduce_all(
            &reducer,
            &[
                Action::set_dirty("a"),
                Action::set_touched("a"),
                Action::set_pristine("a"),
                Action::set_untouched("a"),
            ],
        );
        let field = get_field(&state, "a");
        assert!(field.pristine && !field.dirty);
        assert!(field.untouched && !field.touched);
    }

    #[test]
    fn test_merge_keeps_earlier_flags() {
        let reducer = FieldReducer::default();
        let state = reduce_all(&reducer, &[Action::focus("a"), Action::change("a", "x")]);
        let field = get_field(&state, "a");
        assert!(field.focus);
        assert!(field.dirty);
        assert!(!field.pristine);
    }

    #[test]
    fn test_merge_keeps_child_records() {
        let reducer = FieldReducer::default();
        let state = reduce_all(
            &reducer,
            &[Action::set_touched("user.name"), Action::focus("user")],
        );
        assert!(get_field(&state, "user").focus);
        assert!(get_field(&state, "user.name").touched);
    }

    #[test]
    fn test_merge_keeps_positional_children() {
        let reducer = FieldReducer::default();
        let state = reduce_all(
            &reducer,
            &[Action::blur("rows.1.qty"), Action::set_dirty("rows")],
        );
        assert!(get_field(&state, "rows").dirty);
        assert!(get_field(&state, "rows.1.qty").touched);
        assert!(state.get_key("rows").and_then(|r| r.get_key("0")).is_none());
    }

    #[test]
    fn test_child_named_like_a_flag_survives() {
        let reducer = FieldReducer::default();
        let state = reduce_all(
            &reducer,
            &[Action::blur("settings.blur"), Action::focus("settings")],
        );
        let child = get_field(&state, "settings.blur");
        assert!(child.touched);
        assert!(child.blur);
        assert!(get_field(&state, "settings").focus);

        let state = reduce_all(
            &reducer,
            &[
                Action::set_touched("form.errors"),
                Action::set_validity("form", Validity::Flag(false)),
                Action::change("form.touched", "x"),
                Action::blur("form"),
            ],
        );
        assert!(get_field(&state, "form.errors").touched);
        assert!(get_field(&state, "form.touched").dirty);
        let parent = get_field(&state, "form");
        assert_eq!(parent.validity, Some(Validity::Flag(false)));
        assert!(!parent.is_valid());
        assert!(!parent.focus);
    }

    #[test]
    fn test_unknown_kind_resets() {
        let reducer = FieldReducer::default();
        let state = reduce_all(
            &reducer,
            &[
                Action::focus("a"),
                Action::set_validity("a", Validity::Flag(false)),
                Action::new("load", "a"),
            ],
        );
        assert_eq!(
            state.get_key("a").map(Tree::to_value),
            Some(default_record().to_value())
        );
        assert_eq!(get_field(&state, "a"), FieldState::default());
    }

    #[test]
    fn test_reset_kind() {
        let reducer = FieldReducer::default();
        let state = reduce_all(&reducer, &[Action::blur("a"), Action::reset("a")]);
        assert_eq!(get_field(&state, "a"), FieldState::default());
    }

    #[test]
    fn test_set_validity() {
        let reducer = FieldReducer::default();
        let validity: Validity =
            serde_json::from_value(json!({"required": true, "email": false})).unwrap();
        let state = reducer.reduce(&Tree::empty_map(), &Action::set_validity("email", validity));
        let field = get_field(&state, "email");
        assert!(!field.is_valid());
        assert_eq!(
            state.get_key("email").and_then(|r| r.get_key(ERRORS)).map(Tree::to_value),
            Some(json!({"required": false, "email": true}))
        );
    }

    #[test]
    fn test_scope_filters_actions() {
        let reducer = FieldReducer::new("user", Tree::empty_map());
        let state = reducer.initial_state();

        let ignored = reducer.reduce(&state, &Action::focus("username"));
        assert!(ignored.same(&state));
        let ignored = reducer.reduce(&state, &Action::focus("other.name"));
        assert!(ignored.same(&state));

        let next = reducer.reduce(&state, &Action::focus("user.name"));
        assert!(get_field(&next, "name").focus);
    }

    #[test]
    fn test_scope_root_record() {
        let reducer = FieldReducer::new("user", Tree::empty_map());
        let next = reducer.reduce(&reducer.initial_state(), &Action::set_touched("user"));
        assert!(FieldState::from_tree(&next).touched);
    }

    #[test]
    fn test_unrelated_records_shared() {
        let reducer = FieldReducer::default();
        let state = reduce_all(&reducer, &[Action::focus("a.x"), Action::focus("b.y")]);
        let next = reducer.reduce(&state, &Action::blur("a.x"));
        assert!(state.get_key("b").unwrap().same(next.get_key("b").unwrap()));
    }

    #[test]
    fn test_wildcard_model_is_ignored() {
        let reducer = FieldReducer::default();
        let state = reduce_all(&reducer, &[Action::focus("groups.0.name")]);
        let next = reducer.reduce(&state, &Action::blur("groups[].name"));
        assert!(next.same(&state));
    }
}
