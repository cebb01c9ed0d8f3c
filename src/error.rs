use reqwest::StatusCode;
use serde_json::Value;

/// One failed contract check. The first failed check wins; checks within a
/// single validation unit are never aggregated.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("expected status 200 OK, got {0}")]
    StatusMismatch(StatusCode),

    #[error("expected content-type {expected:?}, got {actual:?}")]
    ContentTypeMismatch { expected: String, actual: String },

    #[error("response body is not a JSON array: {0}")]
    ShapeMismatch(String),

    #[error("first source record is missing field {0:?}")]
    MissingField(String),

    #[error("field {field:?} expected {expected}, got {actual}")]
    ValueMismatch {
        field: String,
        expected: Value,
        actual: Value,
    },

    #[error("sources list is empty")]
    EmptySources,

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}
