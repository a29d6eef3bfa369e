//! Error type shared by every component.

/// Fieldless classification of an [`Error`], convenient for matching.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Input text does not match any accepted textual pattern.
    InvalidFormat,
    /// Wrong byte length, out-of-range or non-numeric integer, malformed override.
    InvalidArgument,
    /// The identifier's version or variant does not support the operation.
    UnsupportedOperation,
    /// An entropy source or environment lookup is unavailable and no fallback applies.
    UnsatisfiedDependency,
}

/// Error returned by parsing, conversion, and generation operations.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("unsatisfied dependency: {0}")]
    UnsatisfiedDependency(String),
}

impl Error {
    /// Returns the kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            Self::UnsatisfiedDependency(_) => ErrorKind::UnsatisfiedDependency,
        }
    }

    pub(crate) fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    pub(crate) fn unsatisfied(message: impl Into<String>) -> Self {
        Self::UnsatisfiedDependency(message.into())
    }
}

/// Result type alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
