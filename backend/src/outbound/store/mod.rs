//! Hosted store adapters.
//!
//! A single project URL serves both the identity endpoints (`/auth/v1`) and
//! the table endpoints (`/rest/v1`); the adapters here share one
//! [`StoreConnection`].

mod client;
mod dto;
mod identity;
mod subscriptions;

pub use client::StoreConnection;
pub use identity::StoreIdentityProvider;
pub use subscriptions::StoreSubscriptionRepository;
