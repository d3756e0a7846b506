use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown pet category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Why a page fetch failed, as seen by the listing loop.
///
/// Both variants are handled identically by the loop: the in-flight guard is
/// released, nothing is appended, and no automatic retry happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network unreachable, timeout, or an unreadable response body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport(_) => None,
            FetchError::Server { status, .. } => Some(*status),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}
