//! Account domain service.
//!
//! Implements [`AccountCommand`] on top of an [`IdentityProvider`]. Provider
//! failures are surfaced as upstream errors carrying the provider's message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AccountCommand, IdentityProvider, IdentityProviderError};
use crate::domain::{AuthenticatedUser, Credentials, Error};

/// Account service delegating to an identity provider.
#[derive(Clone)]
pub struct AccountService<P> {
    identity: Arc<P>,
}

impl<P> AccountService<P> {
    /// Create a service backed by `identity`.
    pub fn new(identity: Arc<P>) -> Self {
        Self { identity }
    }
}

fn map_identity_error(operation: &'static str, error: IdentityProviderError) -> Error {
    warn!(operation, error = %error, "identity provider call failed");
    Error::upstream(error.to_string())
}

#[async_trait]
impl<P> AccountCommand for AccountService<P>
where
    P: IdentityProvider,
{
    async fn register(&self, credentials: &Credentials) -> Result<(), Error> {
        self.identity
            .sign_up(credentials)
            .await
            .map_err(|err| map_identity_error("sign_up", err))?;
        info!(email = credentials.email(), "account registered");
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser, Error> {
        let user = self
            .identity
            .sign_in_with_password(credentials)
            .await
            .map_err(|err| map_identity_error("sign_in", err))?;
        info!(user_id = %user.id(), "user signed in");
        Ok(user)
    }
}
