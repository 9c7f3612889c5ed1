use crate::session::model::Screen;
use crate::session::storage::StorageError;
use thiserror::Error;

/// Failures surfaced by the session controller.
///
/// `Display` is the text shown inline to the citizen.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),

    #[error("Please log in first")]
    NotAuthenticated,

    #[error("This action is only available on the {expected} screen (currently on {actual})")]
    WrongScreen { expected: Screen, actual: Screen },

    /// The API answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Could not reach the server: {0}")]
    Transport(String),

    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
