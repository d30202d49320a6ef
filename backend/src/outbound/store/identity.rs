//! Identity provider adapter for the hosted store's auth endpoints.

use async_trait::async_trait;
use tracing::debug;

use super::client::{StoreConnection, decode_json};
use super::dto::{PasswordGrantDto, SignInResponseDto};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AuthenticatedUser, Credentials};

const SIGN_UP_PATH: &str = "auth/v1/signup";
const TOKEN_PATH: &str = "auth/v1/token";

/// [`IdentityProvider`] backed by the store's `/auth/v1` endpoints.
#[derive(Debug, Clone)]
pub struct StoreIdentityProvider {
    connection: StoreConnection,
}

impl StoreIdentityProvider {
    /// Create an adapter sharing `connection`.
    pub fn new(connection: StoreConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl IdentityProvider for StoreIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), IdentityProviderError> {
        let url = self.connection.endpoint(SIGN_UP_PATH)?;
        let request = self
            .connection
            .client()
            .post(url)
            .json(&PasswordGrantDto::from(credentials));
        self.connection.execute(request).await?;
        debug!("sign-up accepted by identity provider");
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        let url = self.connection.endpoint(TOKEN_PATH)?;
        let request = self
            .connection
            .client()
            .post(url)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrantDto::from(credentials));
        let body = self.connection.execute(request).await?;
        let decoded: SignInResponseDto = decode_json(&body, "sign-in")?;
        decoded
            .into_domain(credentials.email())
            .map_err(IdentityProviderError::decode)
    }
}
