//! Session-backed HTTP service for tracking recurring subscriptions.
//!
//! Layout follows ports and adapters: [`domain`] holds the model, services,
//! and port traits; [`inbound`] exposes them over HTTP; [`outbound`] talks to
//! the hosted store (or keeps data in memory for local runs).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
