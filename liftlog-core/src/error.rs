use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure kinds surfaced by every core operation.
///
/// Mutations touching more than one table run inside a transaction that is
/// rolled back whenever one of these is returned, so partial writes are never
/// observable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl CoreError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        CoreError::Validation(msg.into())
    }
}
