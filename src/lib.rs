//! Role-gated lifecycle core for pre-delivery inspection (PDI) requests.
//!
//! This crate provides the authorization and lifecycle rules behind a
//! dealership's PDI request flow:
//! - **Credentials**: Signed bearer tokens resolved into typed principals
//! - **Access checks**: Fail-closed, per-operation requirement evaluation
//! - **Lifecycle**: Create, admin-update, list, and fetch operations with
//!   terminal-state and ownership rules enforced in one place
//!
//! # Core Types
//!
//! - [`Principal`] / [`Role`]: Who is calling and what they may do
//! - [`CredentialKeys`] / [`AccessGate`]: Credential issuing and resolution
//! - [`AccessCheck`]: Chained requirement evaluation for one operation
//! - [`PdiRequest`] / [`PdiStatus`]: The inspection request and its states
//! - [`PdiService`]: The lifecycle operations over pluggable collaborators
//!
//! # Examples
//!
//! ```
//! use pdi_core::{
//!     AccessGate, CredentialKeys, MemoryStore, NewPdiRequest, PdiService, PdiStatus,
//!     Principal, RecordingNotifier, Role,
//! };
//! use time::Duration;
//!
//! let keys = CredentialKeys::new(b"demo-secret", Duration::hours(8));
//! let gate = AccessGate::new(keys);
//! let service = PdiService::new(MemoryStore::new(), RecordingNotifier::new());
//!
//! // A client logs in (the credential round-trips through the gate)...
//! let client = Principal {
//!     user_id: "u-1".to_string(),
//!     email: "alice@example.com".to_string(),
//!     name: "Alice".to_string(),
//!     role: Role::Client,
//! };
//! let token = gate.keys().issue(&client).expect("issue credential");
//! let principal = gate.resolve_principal(Some(&token)).expect("valid credential");
//!
//! // ...and submits an inspection request.
//! let created = service
//!     .create(
//!         Some(&principal),
//!         NewPdiRequest {
//!             vehicle_make: "Honda".to_string(),
//!             vehicle_model: "City".to_string(),
//!             location: "Pune".to_string(),
//!             mobile: "9999999999".to_string(),
//!             ..Default::default()
//!         },
//!     )
//!     .expect("create request");
//! assert_eq!(created.request.status, PdiStatus::Pending);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credential;
mod error;
mod gate;
mod notify;
mod principal;
mod request;
mod role;
mod service;
mod store;
pub mod web;

pub use credential::{Claims, CredentialKeys};
pub use error::{Error, ErrorKind};
pub use gate::{AccessCheck, AccessGate, AccessReq, Authenticated, RoleIs};
pub use notify::{Notification, Notifier, NotifyOutcome, RecordingNotifier};
pub use principal::Principal;
pub use request::{NewPdiRequest, PdiRequest, PdiRequestPatch, PdiStatus};
pub use role::Role;
pub use service::{Created, PdiService, Updated};
pub use store::{MemoryStore, PdiStore, StoreError, StoreErrorKind};
