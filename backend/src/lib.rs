//! Encore backend: a marketplace connecting performers with clients.
//!
//! The crate is laid out hexagonally. [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports over PostgreSQL, the payment processor and
//! password hashing.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
