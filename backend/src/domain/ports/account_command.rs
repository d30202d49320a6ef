//! Driving port for account registration and sign-in.
//!
//! Inbound adapters call this port without knowing which identity provider
//! backs it, which keeps handler tests free of network access.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Credentials, Error};

/// Account use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account with the identity provider.
    async fn register(&self, credentials: &Credentials) -> Result<(), Error>;

    /// Authenticate credentials and return the signed-in user.
    async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser, Error>;
}
