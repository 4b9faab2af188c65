use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Record shape cannot be flattened into named fields
    InvalidSchema,
    /// Field kind was never registered
    UnknownFieldKind,
    /// Native value incompatible with the field kind
    TypeMismatch,
    /// Predicate not supported by the field kind
    UnsupportedOperation,
    DuplicateId,
    NotFound,
    InvalidQuery,
    InvalidArgument,
    Parse,
}

#[derive(Debug, Error)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error { kind, context: context.into() }
    }

    pub fn invalid_schema(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidSchema, context)
    }

    pub fn unknown_field_kind(kind: &str) -> Self {
        Error::new(ErrorKind::UnknownFieldKind, format!("field kind '{kind}' is not registered"))
    }

    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        Error::new(
            ErrorKind::TypeMismatch,
            format!("expected {expected} value, got {actual}"),
        )
    }

    pub fn unsupported(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::UnsupportedOperation, context)
    }

    pub fn invalid_query(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidQuery, context)
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidArgument, context)
    }

    pub fn parse(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::Parse, context)
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
