//! Form configuration.
//!
//! ```json
//! {
//!   "model": "user",
//!   "initialModel": {"name": "", "groups": []},
//!   "initialFields": {},
//!   "logActions": true
//! }
//! ```

use form_model_path::{parse_model_path_strict, validate_path, Tree};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    /// Scope model path shared by the model and field reducers.
    pub model: String,
    pub initial_model: Tree,
    pub initial_fields: Tree,
    /// Install a `LoggingMiddleware` on the store.
    pub log_actions: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            initial_model: Tree::empty_map(),
            initial_fields: Tree::empty_map(),
            log_actions: false,
        }
    }
}

impl FormConfig {
    pub fn from_json_str(input: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_value(value: Value) -> Result<Self, FormError> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// The scope must be a concrete, well-formed model path.
    pub fn validate(&self) -> Result<(), FormError> {
        let scope_error = |source| FormError::Scope {
            model: self.model.clone(),
            source,
        };
        let path = parse_model_path_strict(&self.model).map_err(scope_error)?;
        validate_path(&path).map_err(scope_error)?;
        if path.iter().any(|segment| segment.is_wildcard()) {
            return Err(FormError::WildcardScope(self.model.clone()));
        }
        Ok(())
    }
}
