//! Framework-agnostic HTTP response shape.

use serde_json::{json, Value};

use crate::error::Error;

/// A handler result ready for a framework to serialize onto the wire.
///
/// Carries the numeric HTTP status and a JSON body. Error responses always
/// take the shape `{"error": "<message>"}` with the status derived from the
/// error kind, so clients can branch on status alone.
///
/// # Examples
///
/// ```
/// use pdi_core::web::ApiResponse;
/// use pdi_core::Error;
///
/// let denied = ApiResponse::from_error(&Error::forbidden("ADMIN role required"));
/// assert_eq!(denied.status, 403);
/// assert_eq!(denied.body["error"], "ADMIN role required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// JSON response body
    pub body: Value,
}

impl ApiResponse {
    /// A success response with the given status and body.
    pub fn ok(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Maps an operation error onto its HTTP shape.
    pub fn from_error(error: &Error) -> Self {
        Self {
            status: error.kind.http_status(),
            body: json!({ "error": error.message }),
        }
    }
}

impl From<Error> for ApiResponse {
    fn from(error: Error) -> Self {
        Self::from_error(&error)
    }
}
