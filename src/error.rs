//! Error handling for castmqtt.
//!
//! Provides a unified error type based on gRPC status codes, with mapping
//! from the underlying parse, I/O and serialization errors to categories.
//!
//! None of these errors ever escape the [`PropertyHandler`] entry points:
//! the handler logs and drops them. They do surface from the fallible
//! building blocks ([`Command::parse`], [`Value::to_canonical`],
//! [`Config::from_file`]) and from [`Publisher`] implementations.
//!
//! # Example
//!
//! ```rust
//! use castmqtt::error::{Error, ErrorKind, Result};
//!
//! fn parse_level(payload: &str) -> Result<f64> {
//!     if payload.is_empty() {
//!         return Err(Error::invalid_argument("empty payload"));
//!     }
//!     Ok(payload.parse::<f64>()?)
//! }
//!
//! assert_eq!(parse_level("").unwrap_err().kind, ErrorKind::InvalidArgument);
//! ```
//!
//! [`PropertyHandler`]: crate::handler::PropertyHandler
//! [`Command::parse`]: crate::command::Command::parse
//! [`Value::to_canonical`]: crate::value::Value::to_canonical
//! [`Config::from_file`]: crate::config::Config::from_file
//! [`Publisher`]: crate::handler::Publisher

#![allow(clippy::enum_glob_use)]

use std::fmt;
use thiserror::Error;

/// Main error type combining error kind and details.
#[derive(Debug)]
pub struct Error {
    /// Classification of the error
    pub kind: ErrorKind,

    /// Details of the underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl Error {
    /// Attempts to downcast the underlying error to a concrete type.
    ///
    /// # Example
    /// ```
    /// use castmqtt::error::Error;
    ///
    /// let error = Error::from("x".parse::<f64>().unwrap_err());
    /// assert!(error.downcast::<std::num::ParseFloatError>().is_some());
    /// ```
    #[must_use]
    pub fn downcast<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.error.downcast_ref::<E>()
    }
}

/// Standard result type for castmqtt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories based on gRPC status codes.
///
/// See [gRPC status codes](https://github.com/googleapis/googleapis/blob/master/google/rpc/code.proto)
/// for the original definitions.
#[expect(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum ErrorKind {
    #[error("unknown error")]
    Unknown = 2,

    /// Malformed payloads and invalid configuration values.
    #[error("invalid argument specified")]
    InvalidArgument = 3,

    #[error("not found")]
    NotFound = 5,

    #[error("permission denied")]
    PermissionDenied = 7,

    /// Numbers that do not fit the target integer type.
    #[error("out of range")]
    OutOfRange = 11,

    #[error("internal error")]
    Internal = 13,

    /// Transport-side publish failures.
    #[error("service unavailable")]
    Unavailable = 14,

    #[error("unrecoverable data loss or corruption")]
    DataLoss = 15,
}

impl Error {
    /// Creates a new error with specified kind and details.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use castmqtt::error::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::NotFound, "config file missing");
    /// assert_eq!(err.kind, ErrorKind::NotFound);
    /// ```
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind,
            error: error.into(),
        }
    }

    /// Creates an error for unrecoverable data loss or corruption.
    pub fn data_loss<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::DataLoss, error)
    }

    /// Creates an error for internal failures, such as a serializer that
    /// refuses a value it should accept.
    pub fn internal<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Internal, error)
    }

    /// Creates an error for invalid arguments.
    ///
    /// Use when a payload or configuration value is malformed, regardless
    /// of any other state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use castmqtt::error::{Error, ErrorKind};
    ///
    /// let err = Error::invalid_argument("array must have two elements");
    /// assert_eq!(err.kind, ErrorKind::InvalidArgument);
    /// ```
    pub fn invalid_argument<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::InvalidArgument, error)
    }

    /// Creates an error for missing resources.
    pub fn not_found<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::NotFound, error)
    }

    /// Creates an error for values outside valid range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use castmqtt::error::{Error, ErrorKind};
    ///
    /// let err = Error::out_of_range("position does not fit in 64 bits");
    /// assert_eq!(err.kind, ErrorKind::OutOfRange);
    /// ```
    pub fn out_of_range<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::OutOfRange, error)
    }

    /// Creates an error for permission denied conditions.
    pub fn permission_denied<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::PermissionDenied, error)
    }

    /// Creates an error for an unavailable transport.
    ///
    /// [`Publisher`](crate::handler::Publisher) implementations return this
    /// when the broker connection is down.
    pub fn unavailable<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Unavailable, error)
    }

    /// Creates an error for unknown errors.
    pub fn unknown<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Unknown, error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// Formats the error for display, showing both kind and details.
///
/// Format: "{kind}: {details}"
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}: ", self.kind)?;
        self.error.fmt(fmt)
    }
}

/// Converts IO errors into appropriate error kinds.
///
/// Maps standard IO errors to their logical equivalents:
/// * `NotFound` -> `NotFound`
/// * `PermissionDenied` -> `PermissionDenied`
/// * `UnexpectedEof` -> `DataLoss`
/// * `InvalidInput` and `InvalidData` -> `InvalidArgument`
/// * `BrokenPipe` and connection failures -> `Unavailable`
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind::*;
        match err.kind() {
            NotFound => Self::not_found(err),
            PermissionDenied => Self::permission_denied(err),
            UnexpectedEof => Self::data_loss(err),
            InvalidInput | InvalidData => Self::invalid_argument(err),
            BrokenPipe | ConnectionRefused | ConnectionReset | ConnectionAborted
            | NotConnected => Self::unavailable(err),
            _ => Self::unknown(err),
        }
    }
}

/// Converts JSON errors into appropriate error kinds.
///
/// Syntax, data and EOF errors come from malformed payloads and map to
/// `InvalidArgument`. I/O errors cannot occur on in-memory payloads but map
/// to `Internal` should a serializer ever report one.
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            Category::Syntax | Category::Data | Category::Eof => Self::invalid_argument(e),
            Category::Io => Self::internal(e),
        }
    }
}

/// Converts float parsing errors to `InvalidArgument`.
impl From<std::num::ParseFloatError> for Error {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::invalid_argument(e)
    }
}

/// Converts UTF-8 decoding errors to `InvalidArgument`.
impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::invalid_argument(e)
    }
}

/// Converts TOML parsing errors to `InvalidArgument`.
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::invalid_argument(e)
    }
}

/// Converts URL parsing errors to `InvalidArgument`.
impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::invalid_argument(e)
    }
}
