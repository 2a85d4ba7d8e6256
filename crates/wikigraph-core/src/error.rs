//! Error types for Wikigraph operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Wikigraph crates. Uses `thiserror` for derive macros.
//!
//! Every failure a query can produce maps to exactly one variant, and every
//! variant maps to a stable [`Error::code`] and [`Error::status_code`] so that
//! front ends can surface it without inspecting messages.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in Wikigraph operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A referenced node (or community) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unknown recommendation strategy.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// An argument is out of its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Load-time referential or uniqueness violation.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// The operation was aborted by its deadline or by the caller.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// I/O error, optionally tied to a path.
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path involved, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic operation failure.
    #[error("Operation failed: {0}")]
    Operation(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, path: None }
    }
}

impl Error {
    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a not found error for a node id.
    pub fn node_not_found(id: impl AsRef<str>) -> Self {
        Self::NotFound(format!("node '{}'", id.as_ref()))
    }

    /// Create an invalid strategy error.
    pub fn invalid_strategy(name: impl Into<String>) -> Self {
        Self::InvalidStrategy(name.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an integrity error.
    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity(msg.into())
    }

    /// Create a cancellation error.
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Wrap an I/O error without path context.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io { source, path: None }
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create an I/O error for a file that does not exist.
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            path,
        )
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a generic operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidStrategy(_) => "INVALID_STRATEGY",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Integrity(_) => "INTEGRITY_ERROR",
            Self::Cancelled(_) => "CANCELLED",
            Self::Io { .. } => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Operation(_) => "OPERATION_FAILED",
        }
    }

    /// HTTP status an external layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidStrategy(_) | Self::InvalidArgument(_) => 400,
            Self::Cancelled(_) => 504,
            _ => 500,
        }
    }

    /// Whether the failure is attributable to the caller's input.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Result type alias using Wikigraph's Error type.
pub type Result<T> = std::result::Result<T, Error>;
