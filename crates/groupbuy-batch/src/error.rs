use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    /// The payload was valid JSON but not the array of records the
    /// operation expects. Distinct from an empty array, which is a valid
    /// input producing an empty result.
    #[error("expected a JSON array of records, got {found}")]
    NotAnArray { found: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
