//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and the PDI core. It
//! handles:
//! - Mapping HTTP requests to domain inputs ([`RequestAdapter`])
//! - Running the handler pipeline (credential → principal → service)
//! - Mapping results and errors onto wire shapes ([`ApiResponse`])
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no
//!    framework-specific code. Integrations build a `RequestAdapter` from
//!    their own request type and serialize the returned `ApiResponse`.
//!
//! 2. **Opaque Credentials**: The adapter carries the bearer credential as
//!    an uninterpreted string. Resolution into a [`Principal`] happens in
//!    the handlers through the [`AccessGate`], once per request.
//!
//! 3. **No Authorization Here**: The handlers translate shapes; the
//!    allow/deny decisions live in the lifecycle service so they cannot be
//!    bypassed by a different transport.
//!
//! # Integration Model
//!
//! Framework-specific code should:
//! 1. Build a `RequestAdapter` from the framework request (credential,
//!    path params, decoded JSON body)
//! 2. Route to the matching [`PdiHandlers`] method
//! 3. Write the returned `ApiResponse` status and body to the wire
//!
//! [`Principal`]: crate::Principal
//! [`AccessGate`]: crate::AccessGate

mod adapter;
mod handlers;
mod response;

pub use adapter::RequestAdapter;
pub use handlers::PdiHandlers;
pub use response::ApiResponse;
