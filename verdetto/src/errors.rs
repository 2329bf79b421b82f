//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = VerdettoError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum VerdettoError {
    InvalidModel(InvalidModelError),
    InvalidRecord(InvalidRecordError),
    InvalidArgument(InvalidArgumentError),

    IOError(std::io::Error),
}

impl VerdettoError {
    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_record<S>(line: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidRecord(InvalidRecordError { line: line.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for VerdettoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidRecord(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),

            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for VerdettoError {}

/// Error used when the decision list is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when an input line does not match the expected field pattern.
#[derive(Debug)]
pub struct InvalidRecordError {
    /// The offending line.
    pub(crate) line: String,
}

impl fmt::Display for InvalidRecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidRecordError: malformed line: {}", self.line)
    }
}

impl Error for InvalidRecordError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<std::io::Error> for VerdettoError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
