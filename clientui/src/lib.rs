//! Server-side web front-end for a learning-management system.
//!
//! The crate authenticates users against a remote LMS API, keeps their
//! identity in a signed cookie session, and proxies course/enrollment
//! actions to that API through thin HTTP adapters. Modules follow a
//! hexagonal layout:
//!
//! - [`domain`]: transport-agnostic models, gateway ports, and the
//!   enrollment workflow service.
//! - [`inbound`]: the HTTP adapter with page handlers, session helpers, and
//!   error mapping.
//! - [`outbound`]: the reqwest adapters implementing the gateway ports.
//! - [`server`]: application assembly and configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use domain::TraceId;
pub use middleware::trace::Trace;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
