use std::error::Error;
use std::io;

/// An error raised by a collaborator: the store answering statement lookups or the sink
/// receiving rendered statements.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl StorageError {
    /// Builds an error from a printable error message.
    #[inline]
    pub fn msg(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        Self::Other(msg.into())
    }
}
