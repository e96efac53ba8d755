use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentalAnalysisError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RentalAnalysisError {
    /// Name of the offending input field, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            RentalAnalysisError::InvalidInput { field, .. } => Some(field),
            RentalAnalysisError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for RentalAnalysisError {
    fn from(e: serde_json::Error) -> Self {
        RentalAnalysisError::SerializationError(e.to_string())
    }
}
