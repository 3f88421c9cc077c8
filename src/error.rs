use thiserror::Error;

/// Errors surfaced by [`crate::SqliteManager`].
///
/// Each variant names the phase that failed and carries the engine's (or the
/// filesystem's) own diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqliteManagerError {
    /// Opening the database failed
    #[error("open failed: {0}")]
    OpenFailed(String),
    /// Preparing a statement failed
    #[error("prepare failed: {0}")]
    PrepareFailed(String),
    /// Binding a parameter failed
    #[error("bind failed: {0}")]
    BindFailed(String),
    /// Filesystem errors, step errors and everything else
    #[error("{0}")]
    CommonFailed(String),
}

impl SqliteManagerError {
    /// The message carried by the error, without the phase prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::OpenFailed(m)
            | Self::PrepareFailed(m)
            | Self::BindFailed(m)
            | Self::CommonFailed(m) => m,
        }
    }
}

pub type Result<T, E = SqliteManagerError> = std::result::Result<T, E>;

/// Extracts the engine's message from a rusqlite error.
pub(crate) fn engine_message(err: &rusqlite::Error) -> String {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message.clone(),
        rusqlite::Error::SqlInputError { msg, .. } => msg.clone(),
        other => other.to_string(),
    }
}
