use form_model_path::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("track pattern {0:?} has no `[]` marker")]
    MissingWildcard(String),

    #[error("track pattern {0:?} has more than one `[]` marker")]
    MultipleWildcards(String),
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("invalid form config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid scope model {model:?}: {source}")]
    Scope {
        model: String,
        #[source]
        source: ValidationError,
    },

    #[error("scope model {0:?} must not hold a `[]` marker")]
    WildcardScope(String),

    #[error(transparent)]
    Track(#[from] TrackError),
}
