//! Framework-agnostic request handlers.
//!
//! Each handler runs the same pipeline: resolve the bearer credential into a
//! principal through the [`AccessGate`], decode the request parts it needs,
//! delegate to the lifecycle service, and map the result (or error) onto an
//! [`ApiResponse`]. Authorization decisions live in the service; the
//! handlers only translate between wire and domain shapes.

use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::error::Error;
use crate::gate::AccessGate;
use crate::notify::Notifier;
use crate::service::PdiService;
use crate::store::PdiStore;

use super::adapter::RequestAdapter;
use super::response::ApiResponse;

/// Handlers for the PDI request endpoints.
///
/// Owns the access gate and the lifecycle service; a framework integration
/// constructs one of these and routes requests to its methods.
///
/// # Examples
///
/// ```
/// use pdi_core::web::{PdiHandlers, RequestAdapter};
/// use pdi_core::{AccessGate, CredentialKeys, MemoryStore, PdiService, RecordingNotifier};
/// use time::Duration;
///
/// let keys = CredentialKeys::new(b"handler-secret", Duration::hours(1));
/// let handlers = PdiHandlers::new(
///     AccessGate::new(keys),
///     PdiService::new(MemoryStore::new(), RecordingNotifier::new()),
/// );
///
/// // No credential: denied before anything is read or written.
/// let resp = handlers.list_requests(&RequestAdapter::new("req-1".to_string()));
/// assert_eq!(resp.status, 401);
/// ```
pub struct PdiHandlers<S: PdiStore, N: Notifier> {
    gate: AccessGate,
    service: PdiService<S, N>,
}

impl<S: PdiStore, N: Notifier> PdiHandlers<S, N> {
    /// Creates handlers over the given gate and service.
    pub fn new(gate: AccessGate, service: PdiService<S, N>) -> Self {
        Self { gate, service }
    }

    /// Returns the access gate (login flows issue credentials through it).
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Returns the lifecycle service.
    pub fn service(&self) -> &PdiService<S, N> {
        &self.service
    }

    /// `POST /pdi-requests` — submit a new request. Returns 201 with the
    /// persisted record.
    pub fn create_request(&self, adapter: &RequestAdapter) -> ApiResponse {
        let principal = self.gate.resolve_principal(adapter.credential());

        let result = parse_body(adapter)
            .and_then(|input| self.service.create(principal.as_ref(), input));

        match result {
            Ok(created) => ApiResponse::ok(201, json!(created.request)),
            Err(e) => self.reject(adapter, e),
        }
    }

    /// `PATCH /pdi-requests/{id}` — admin update. Returns 200 with the
    /// record after the patch.
    pub fn update_request(&self, adapter: &RequestAdapter) -> ApiResponse {
        let principal = self.gate.resolve_principal(adapter.credential());

        let result = parse_id(adapter).and_then(|id| {
            let patch = parse_body(adapter)?;
            self.service.update_status(principal.as_ref(), id, patch)
        });

        match result {
            Ok(updated) => ApiResponse::ok(200, json!(updated.request)),
            Err(e) => self.reject(adapter, e),
        }
    }

    /// `GET /pdi-requests` — list requests visible to the caller, newest
    /// first. Returns 200 with a JSON array.
    pub fn list_requests(&self, adapter: &RequestAdapter) -> ApiResponse {
        let principal = self.gate.resolve_principal(adapter.credential());

        match self.service.list_for_principal(principal.as_ref()) {
            Ok(records) => ApiResponse::ok(200, json!(records)),
            Err(e) => self.reject(adapter, e),
        }
    }

    /// `GET /pdi-requests/{id}` — fetch a single request. Returns 200 with
    /// the record.
    pub fn get_request(&self, adapter: &RequestAdapter) -> ApiResponse {
        let principal = self.gate.resolve_principal(adapter.credential());

        let result = parse_id(adapter)
            .and_then(|id| self.service.get_by_id(principal.as_ref(), id));

        match result {
            Ok(record) => ApiResponse::ok(200, json!(record)),
            Err(e) => self.reject(adapter, e),
        }
    }

    fn reject(&self, adapter: &RequestAdapter, error: Error) -> ApiResponse {
        tracing::debug!(
            request_id = %adapter.request_id(),
            kind = %error.kind,
            "request rejected"
        );
        ApiResponse::from_error(&error)
    }
}

/// Decodes the JSON body into the expected input shape.
fn parse_body<T: DeserializeOwned>(adapter: &RequestAdapter) -> Result<T, Error> {
    let body = adapter
        .body()
        .ok_or_else(|| Error::validation("request body required"))?;
    serde_json::from_value(body.clone())
        .map_err(|e| Error::validation(format!("malformed request body: {e}")))
}

/// Parses the `id` path parameter.
fn parse_id(adapter: &RequestAdapter) -> Result<Uuid, Error> {
    let raw = adapter
        .path_param("id")
        .ok_or_else(|| Error::validation("missing id path parameter"))?;
    raw.parse::<Uuid>()
        .map_err(|_| Error::validation(format!("'{raw}' is not a valid request id")))
}
