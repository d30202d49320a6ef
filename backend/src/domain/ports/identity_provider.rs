//! Driven port for the external identity provider.
//!
//! The provider owns user accounts. Adapters translate sign-up and password
//! sign-in into provider calls and report any failure with the provider's own
//! wording so it can be shown to the user verbatim.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Credentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised when talking to the identity provider.
    pub enum IdentityProviderError {
        /// The provider refused the request (duplicate email, bad password).
        Rejected { message: String } => "{message}",
        /// The provider could not be reached.
        Transport { message: String } => "identity provider unavailable: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } => "identity provider timed out: {message}",
        /// The provider answered with an unexpected payload.
        Decode { message: String } => "identity provider returned an invalid response: {message}",
    }
}

/// Account operations delegated to the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account. Confirmation is handled by the provider.
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), IdentityProviderError>;

    /// Exchange an email/password pair for the authenticated user.
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError>;
}
