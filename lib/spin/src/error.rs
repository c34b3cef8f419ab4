use rdf_spin_common::error::StorageError;
use rdf_spin_model::{resource_ref_to_term_ref, NamedOrBlankNodeRef, Term};

/// The result of a SPIN parse or render.
pub type SpinResult<T> = Result<T, SpinError>;

/// An error raised while decoding or encoding a SPIN graph.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpinError {
    /// The graph does not describe a valid command, template or rule.
    #[error("{}", malformed_message(.subject, .message))]
    Malformed {
        subject: Option<Term>,
        message: String,
    },
    /// The construct is valid SPIN but cannot be decoded or encoded.
    #[error("Unsupported: {0}")]
    Unsupported(String),
    /// Error from the store or the sink.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SpinError {
    pub fn malformed(subject: Option<Term>, message: impl Into<String>) -> Self {
        Self::Malformed {
            subject,
            message: message.into(),
        }
    }

    /// A [SpinError::Malformed] about the resource `subject`.
    pub fn malformed_at(subject: NamedOrBlankNodeRef<'_>, message: impl Into<String>) -> Self {
        Self::malformed(
            Some(resource_ref_to_term_ref(subject).into_owned()),
            message,
        )
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

fn malformed_message(subject: &Option<Term>, message: &str) -> String {
    match subject {
        Some(subject) => format!("{message} (subject: {subject})"),
        None => message.to_owned(),
    }
}
