//! Request adapter for mapping HTTP requests to core types.

use std::collections::HashMap;

use serde_json::Value;

/// Adapter for converting framework-specific HTTP requests into core types.
///
/// `RequestAdapter` is the primary integration point between web frameworks
/// and the PDI core. It carries the parts of a request the handlers consume:
/// the opaque bearer credential, routing path parameters, and the decoded
/// JSON body.
///
/// This type intentionally contains simple, owned data to avoid coupling to
/// any specific framework's request types. Framework-specific code should
/// implement `From<FrameworkRequest>` for `RequestAdapter`.
///
/// # Examples
///
/// ```
/// use pdi_core::web::RequestAdapter;
/// use serde_json::json;
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.set_credential(Some("eyJhbGciOi...".to_string()));
/// adapter.add_path_param("id".to_string(), "0192cafe-0000-7000-8000-000000000000".to_string());
/// adapter.set_body(Some(json!({"status": "IN_PROGRESS"})));
///
/// assert_eq!(adapter.request_id(), "req-12345");
/// assert!(adapter.credential().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    /// Unique request identifier (required)
    request_id: String,
    /// Opaque bearer credential, if the request carried one
    credential: Option<String>,
    /// Path parameters from routing
    path_params: HashMap<String, String>,
    /// Decoded JSON body, if the request carried one
    body: Option<Value>,
}

impl RequestAdapter {
    /// Creates a new request adapter with the given request ID.
    ///
    /// All other fields start empty; use the setter methods to populate
    /// them from the framework request.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            credential: None,
            path_params: HashMap::new(),
            body: None,
        }
    }

    /// Sets the bearer credential extracted from the request.
    ///
    /// The credential is passed through opaque; resolution into a principal
    /// happens in the handlers via the access gate, never here.
    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential;
    }

    /// Adds a path parameter from routing.
    pub fn add_path_param(&mut self, key: String, value: String) {
        self.path_params.insert(key, value);
    }

    /// Sets the decoded JSON body.
    pub fn set_body(&mut self, body: Option<Value>) {
        self.body = body;
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the bearer credential, if present.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Returns a path parameter by name.
    pub fn path_param(&self, key: &str) -> Option<&str> {
        self.path_params.get(key).map(String::as_str)
    }

    /// Returns the JSON body, if present.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adapter_starts_empty() {
        let adapter = RequestAdapter::new("req-test".to_string());
        assert_eq!(adapter.request_id(), "req-test");
        assert!(adapter.credential().is_none());
        assert!(adapter.body().is_none());
        assert!(adapter.path_param("id").is_none());
    }

    #[test]
    fn adapter_carries_credential_opaquely() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.set_credential(Some("not even a real token".to_string()));
        assert_eq!(adapter.credential(), Some("not even a real token"));
    }

    #[test]
    fn adapter_stores_path_params() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.add_path_param("id".to_string(), "123".to_string());
        assert_eq!(adapter.path_param("id"), Some("123"));
        assert_eq!(adapter.path_param("other"), None);
    }

    #[test]
    fn adapter_stores_json_body() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.set_body(Some(json!({"vehicle_make": "Honda"})));
        assert_eq!(adapter.body().unwrap()["vehicle_make"], "Honda");
    }
}
