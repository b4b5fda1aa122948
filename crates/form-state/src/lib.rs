//! Path-addressed form state.
//!
//! Two reducers keep a form in sync with its data:
//!
//! - [`ModelReducer`] writes `change` actions into the data tree, toggling
//!   values in and out of collections for multi-select fields;
//! - [`FieldReducer`] keeps a parallel tree of [`FieldState`] records (focus,
//!   blur, pristine/dirty, touched/untouched, validity) keyed by the same
//!   model paths.
//!
//! [`track`] turns a pattern like `groups[].name` into a concrete path by
//! finding the matching collection element, and [`is_touched`] /
//! [`is_valid`] aggregate field-state subtrees.
//!
//! # Example
//!
//! ```
//! use form_state::{Action, FieldReducer, ModelReducer, Reducer};
//! use form_model_path::{get_by_model, Tree};
//!
//! let model = ModelReducer::default();
//! let fields = FieldReducer::default();
//!
//! let mut data = model.initial_state();
//! let mut state = fields.initial_state();
//! for action in [Action::focus("email"), Action::change("email", "a@b.c")] {
//!     data = model.reduce(&data, &action);
//!     state = fields.reduce(&state, &action);
//! }
//!
//! assert_eq!(get_by_model(&data, "email"), Some(&Tree::from("a@b.c")));
//! let field = form_state::get_field(&state, "email");
//! assert!(field.focus && field.dirty);
//! ```

pub mod action;
pub use action::{Action, ActionKind};

pub mod field;
pub use field::{default_record, get_field, is_own_entry, FieldState, Validity};

mod field_reducer;
pub use field_reducer::{merge_field, FieldReducer};

mod model_reducer;
pub use model_reducer::{reduce_model, toggle, ModelReducer};

mod track;
pub use track::{is_match, track, Predicate, PredicateFn, Track};

pub mod aggregate;
pub use aggregate::{is_touched, is_valid, NodeShape};

mod store;
pub use store::{FormState, FormStore, HookMiddleware, LoggingMiddleware, Middleware, Reducer};

mod config;
pub use config::FormConfig;

mod error;
pub use error::{FormError, TrackError};
