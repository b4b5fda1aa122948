//! Model reducer.
//!
//! Applies `change` actions to the data tree. Every other action kind leaves
//! the data untouched.

use form_model_path::{parse_model_path, set, strip_prefix, update, Path, Segment, Tree};

use crate::action::{Action, ActionKind};
use crate::store::Reducer;

/// Reducer for the data tree under a scope model path.
///
/// With an empty scope every model path is addressed from the root.
#[derive(Debug, Clone)]
pub struct ModelReducer {
    scope: Path,
    initial: Tree,
}

impl ModelReducer {
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

impl Default for ModelReducer {
    fn default() -> Self {
        Self::new("", Tree::empty_map())
    }
}

impl Reducer for ModelReducer {
    fn initial_state(&self) -> Tree {
        self.initial.clone()
    }

    fn reduce(&self, state: &Tree, action: &Action) -> Tree {
        if action.kind != ActionKind::Change {
            return state.clone();
        }
        let model = parse_model_path(&action.model);
        match strip_prefix(&model, &self.scope) {
            Some(path) => apply_change(state, path, action),
            None => state.clone(),
        }
    }
}

/// Unscoped model reduction: `change` writes at `action.model`, anything
/// else passes the state through.
///
/// # Example
///
/// ```
/// use form_state::{reduce_model, Action};
/// use form_model_path::{get_by_model, Tree};
///
/// let state = Tree::empty_map();
/// let state = reduce_model(&state, &Action::toggle("tags", "a"));
/// let state = reduce_model(&state, &Action::toggle("tags", "b"));
/// let state = reduce_model(&state, &Action::toggle("tags", "a"));
/// assert_eq!(get_by_model(&state, "tags"), Some(&Tree::from(vec![Tree::from("b")])));
/// ```
pub fn reduce_model(state: &Tree, action: &Action) -> Tree {
    if action.kind != ActionKind::Change {
        return state.clone();
    }
    apply_change(state, &parse_model_path(&action.model), action)
}

fn apply_change(state: &Tree, path: &[Segment], action: &Action) -> Tree {
    if action.multi {
        update(state, path, |current| toggle(current, &action.value))
    } else {
        set(state, path, action.value.clone())
    }
}

/// Symmetric difference of the collection at hand with `[value]`.
///
/// Duplicates in `current` collapse; `value` is removed when present and
/// appended when absent. Anything that is not a sequence counts as empty.
pub fn toggle(current: Option<&Tree>, value: &Tree) -> Tree {
    let items = current.and_then(Tree::as_seq).unwrap_or(&[]);

    let mut out: Vec<Tree> = Vec::with_capacity(items.len() + 1);
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    match out.iter().position(|item| item == value) {
        Some(index) => {
            out.remove(index);
        }
        None => out.push(value.clone()),
    }
    Tree::from(out)
}
