use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name}: expected {expected} occurrences, found {actual}")]
    OccurrenceCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("No unpacker available for this image")]
    UnpackUnavailable,

    #[error("Unpacking failed: {0}")]
    UnpackFailed(String),

    #[error("Invalid patch profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid session state: expected {expected}, got {actual}")]
    InvalidSessionState {
        expected: &'static str,
        actual: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error only means the unpack pass does not apply
    pub fn is_unpack_unavailable(&self) -> bool {
        matches!(self, Error::UnpackUnavailable)
    }
}
