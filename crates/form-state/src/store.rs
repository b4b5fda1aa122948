//! Dispatch wrapper around the model and field reducers.
//!
//! The reducers are pure; anything observable about a dispatch, such as
//! logging, goes through [`Middleware`] hooks run by [`FormStore`].

use form_model_path::{get, parse_model_path, strip_prefix, Tree};
use tracing::{debug, trace};

use crate::action::Action;
use crate::aggregate;
use crate::config::FormConfig;
use crate::field::FieldState;
use crate::field_reducer::FieldReducer;
use crate::model_reducer::ModelReducer;
use crate::track::Track;

/// A pure `(state, action) -> state` function with a starting state.
pub trait Reducer {
    fn initial_state(&self) -> Tree;

    fn reduce(&self, state: &Tree, action: &Action) -> Tree;
}

/// The data tree and the field-state tree of one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub model: Tree,
    pub fields: Tree,
}

/// Observes dispatches. Hooks cannot change the state.
pub trait Middleware: Send {
    fn before_dispatch(&mut self, _action: &Action) {}

    fn after_dispatch(&mut self, _action: &Action, _state: &FormState, _changed: bool) {}
}

/// Emits a `tracing` event per dispatch.
#[derive(Debug, Default)]
pub struct LoggingMiddleware {
    dispatched: u64,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl Middleware for LoggingMiddleware {
    fn before_dispatch(&mut self, action: &Action) {
        debug!(
            kind = %action.kind,
            model = %action.model,
            multi = action.multi,
            "dispatching form action"
        );
    }

    fn after_dispatch(&mut self, action: &Action, _state: &FormState, changed: bool) {
        self.dispatched += 1;
        trace!(
            kind = %action.kind,
            model = %action.model,
            changed,
            seq = self.dispatched,
            "form action applied"
        );
    }
}

/// Runs a closure before every dispatch.
pub struct HookMiddleware<F> {
    hook: F,
}

impl<F> HookMiddleware<F>
where
    F: FnMut(&Action) + Send,
{
    pub fn new(hook: F) -> Self {
        Self { hook }
    }
}

impl<F> Middleware for HookMiddleware<F>
where
    F: FnMut(&Action) + Send,
{
    fn before_dispatch(&mut self, action: &Action) {
        (self.hook)(action);
    }
}

/// Owns a form's state and applies actions to it in dispatch order.
///
/// # Example
///
/// ```
/// use form_state::{track, Action, FormStore};
/// use form_model_path::Tree;
/// use serde_json::json;
///
/// let mut store = FormStore::new(
///     "user",
///     Tree::from(json!({"groups": [{"id": 5, "name": "A"}, {"id": 6, "name": "B"}]})),
/// );
///
/// let six = track("user.groups[].name", json!({"id": 6})).unwrap();
/// store.dispatch_tracked(&six, |model| Action::change(model, "Bee"));
/// store.dispatch_tracked(&six, |model| Action::blur(model));
///
/// assert_eq!(store.value("user.groups.1.name"), Some(&Tree::from("Bee")));
/// assert!(store.field("user.groups.1.name").dirty);
/// assert!(store.is_touched("user.groups.1.name"));
/// ```
pub struct FormStore {
    model_reducer: ModelReducer,
    field_reducer: FieldReducer,
    state: FormState,
    middleware: Vec<Box<dyn Middleware>>,
}

impl FormStore {
    /// A store for the data under `scope`, with an empty field-state tree.
    pub fn new(scope: &str, initial_model: Tree) -> Self {
        Self::with_reducers(
            ModelReducer::new(scope, initial_model),
            FieldReducer::new(scope, Tree::empty_map()),
        )
    }

    pub fn with_reducers(model_reducer: ModelReducer, field_reducer: FieldReducer) -> Self {
        let state = FormState {
            model: model_reducer.initial_state(),
            fields: field_reducer.initial_state(),
        };
        Self {
            model_reducer,
            field_reducer,
            state,
            middleware: Vec::new(),
        }
    }

    /// Builds a store from a validated [`FormConfig`].
    pub fn from_config(config: &FormConfig) -> Self {
        let store = Self::with_reducers(
            ModelReducer::new(&config.model, config.initial_model.clone()),
            FieldReducer::new(&config.model, config.initial_fields.clone()),
        );
        if config.log_actions {
            store.with_middleware(LoggingMiddleware::new())
        } else {
            store
        }
    }

    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.add_middleware(middleware);
        self
    }

    pub fn add_middleware(&mut self, middleware: impl Middleware + 'static) {
        self.middleware.push(Box::new(middleware));
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn model(&self) -> &Tree {
        &self.state.model
    }

    pub fn fields(&self) -> &Tree {
        &self.state.fields
    }

    /// Applies `action` to the data tree, then to the field-state tree.
    ///
    /// Returns whether either tree changed.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        for middleware in &mut self.middleware {
            middleware.before_dispatch(action);
        }

        let model = self.model_reducer.reduce(&self.state.model, action);
        let fields = self.field_reducer.reduce(&self.state.fields, action);
        let changed = !model.same(&self.state.model) || !fields.same(&self.state.fields);
        self.state = FormState { model, fields };

        for middleware in &mut self.middleware {
            middleware.after_dispatch(action, &self.state, changed);
        }
        changed
    }

    /// Resolves `track` against the current data and dispatches the action
    /// `build` makes for the concrete path.
    pub fn dispatch_tracked<F>(&mut self, track: &Track, build: F) -> bool
    where
        F: FnOnce(String) -> Action,
    {
        let model = self.resolve(track);
        let action = build(model);
        self.dispatch(&action)
    }

    /// Concrete model path of `track` in the current data.
    pub fn resolve(&self, track: &Track) -> String {
        track.resolve_in(&self.state.model, self.model_reducer.scope())
    }

    /// The data at a full model path.
    pub fn value(&self, model: &str) -> Option<&Tree> {
        let path = parse_model_path(model);
        let relative = strip_prefix(&path, self.model_reducer.scope())?;
        get(&self.state.model, relative)
    }

    /// The field-state node at a full model path.
    pub fn field_node(&self, model: &str) -> Option<&Tree> {
        let path = parse_model_path(model);
        let relative = strip_prefix(&path, self.field_reducer.scope())?;
        get(&self.state.fields, relative)
    }

    /// The record at a full model path, defaulted when absent.
    pub fn field(&self, model: &str) -> FieldState {
        self.field_node(model)
            .map(FieldState::from_tree)
            .unwrap_or_default()
    }

    /// Whether the field-state node at a full model path is touched.
    ///
    /// Only nodes carrying a `$form` marker, and sequences, look at their
    /// children. The field reducer never writes that marker, so a record
    /// written by an action answers for itself alone: after
    /// `blur("user.groups.0.name")`, `is_touched("user.groups")` stays
    /// `false` unless `$form` was seeded at `groups` in the initial fields.
    pub fn is_touched(&self, model: &str) -> bool {
        aggregate::is_touched(self.field_node(model))
    }

    /// Whether the field-state node at a full model path is valid.
    ///
    /// Aggregates like [`FormStore::is_touched`]: an invalid field only makes
    /// an ancestor invalid through a chain of `$form` nodes or sequences.
    pub fn is_valid(&self, model: &str) -> bool {
        aggregate::is_valid(self.field_node(model))
    }
}
