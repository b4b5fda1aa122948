//! Validation functions for model paths.

use thiserror::Error;

use crate::parse::parse_model_path_strict;
use crate::types::Segment;

/// Maximum allowed model path string length.
const MAX_MODEL_PATH_LENGTH: usize = 4096;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unclosed bracket at byte {0}")]
    UnclosedBracket(usize),
    #[error("Unterminated quoted key at byte {0}")]
    UnterminatedQuote(usize),
    #[error("Unexpected character after quoted key at byte {0}")]
    UnexpectedChar(usize),
    #[error("More than one wildcard segment")]
    MultipleWildcards,
    #[error("MODEL_PATH_TOO_LONG")]
    ModelPathTooLong,
    #[error("Path too long")]
    PathTooLong,
}

/// Validate a model path string.
///
/// # Errors
///
/// Returns an error if:
/// - The string exceeds the maximum length (4096 bytes)
/// - A bracket or quoted key is not closed
/// - The parsed path fails [`validate_path`]
///
/// # Example
///
/// ```
/// use form_model_path::validate_model_path;
///
/// validate_model_path("").unwrap();
/// validate_model_path("user.groups[2].name").unwrap();
/// validate_model_path("user.groups[].name").unwrap();
/// validate_model_path("user.groups[2").unwrap_err();
/// validate_model_path("a[].b[]").unwrap_err();
/// ```
pub fn validate_model_path(model: &str) -> Result<(), ValidationError> {
    if model.len() > MAX_MODEL_PATH_LENGTH {
        return Err(ValidationError::ModelPathTooLong);
    }
    let path = parse_model_path_strict(model)?;
    validate_path(&path)
}

/// Validate a parsed path.
///
/// # Errors
///
/// Returns an error if the path exceeds the maximum depth (256 segments) or
/// holds more than one wildcard.
pub fn validate_path(path: &[Segment]) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    if path.iter().filter(|s| s.is_wildcard()).count() > 1 {
        return Err(ValidationError::MultipleWildcards);
    }
    Ok(())
}
