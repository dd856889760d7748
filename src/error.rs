use std::fmt;

/// The kind of operation failure.
///
/// Every boundary operation in this crate maps its failures to exactly one
/// of these kinds before returning. No internal fault propagates past an
/// operation boundary untagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No valid principal was presented
    Unauthenticated,
    /// Valid principal, but insufficient role or ownership
    Forbidden,
    /// Malformed or missing required input
    Validation,
    /// Referenced entity does not exist
    NotFound,
    /// Persistence or unexpected failure
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unauthenticated => write!(f, "unauthenticated"),
            ErrorKind::Forbidden => write!(f, "forbidden"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

impl ErrorKind {
    /// Returns the HTTP-equivalent status code for this kind.
    ///
    /// Mapping: `Unauthenticated` → 401, `Forbidden` → 403,
    /// `Validation` → 400, `NotFound` → 404, `Internal` → 500.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::Unauthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }
}

/// An operation failure with details about what went wrong.
///
/// # Examples
///
/// ```
/// use pdi_core::{Error, ErrorKind};
///
/// let err = Error::validation("vehicle_make must not be empty");
/// assert_eq!(err.kind, ErrorKind::Validation);
/// assert_eq!(err.kind.http_status(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    /// The kind of failure that occurred
    pub kind: ErrorKind,
    /// Human-readable message explaining the failure
    pub message: String,
}

impl Error {
    /// Creates a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An `Unauthenticated` error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// A `Forbidden` error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// A `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// A `NotFound` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// An `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Unauthenticated.to_string(), "unauthenticated");
        assert_eq!(ErrorKind::Forbidden.to_string(), "forbidden");
        assert_eq!(ErrorKind::Validation.to_string(), "validation");
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
        assert_eq!(ErrorKind::Internal.to_string(), "internal");
    }

    #[test]
    fn error_kind_http_status_mapping() {
        assert_eq!(ErrorKind::Unauthenticated.http_status(), 401);
        assert_eq!(ErrorKind::Forbidden.http_status(), 403);
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Internal.http_status(), 500);
    }

    #[test]
    fn error_display_includes_kind_and_message() {
        let err = Error::forbidden("admin role required");
        let out = err.to_string();
        assert!(out.contains("forbidden"));
        assert!(out.contains("admin role required"));
    }

    #[test]
    fn error_constructors_set_kind() {
        assert_eq!(Error::unauthenticated("x").kind, ErrorKind::Unauthenticated);
        assert_eq!(Error::forbidden("x").kind, ErrorKind::Forbidden);
        assert_eq!(Error::validation("x").kind, ErrorKind::Validation);
        assert_eq!(Error::not_found("x").kind, ErrorKind::NotFound);
        assert_eq!(Error::internal("x").kind, ErrorKind::Internal);
    }
}
