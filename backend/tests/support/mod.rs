//! Shared helpers for HTTP integration tests.
//!
//! The doubles wrap the in-memory adapters and count every call so tests can
//! assert that rejected requests never reached a driven port.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use async_trait::async_trait;

use subtrack::domain::ports::{
    IdentityProvider, IdentityProviderError, ListScope, SubscriptionRepository,
    SubscriptionRepositoryError,
};
use subtrack::domain::{
    AuthenticatedUser, Credentials, NewSubscription, Subscription, SubscriptionId,
    SubscriptionPatch, UserId,
};
use subtrack::inbound::http::dashboard::DashboardRenderer;
use subtrack::inbound::http::health::HealthState;
use subtrack::outbound::memory::{InMemoryIdentityProvider, InMemorySubscriptionRepository};
use subtrack::server::{AppDependencies, http_state_from_adapters};

/// Identity provider double counting calls.
#[derive(Default)]
pub struct RecordingIdentity {
    inner: InMemoryIdentityProvider,
    calls: AtomicUsize,
}

impl RecordingIdentity {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for RecordingIdentity {
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), IdentityProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_up(credentials).await
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_in_with_password(credentials).await
    }
}

/// Subscription repository double counting calls.
#[derive(Default)]
pub struct RecordingRepository {
    inner: InMemorySubscriptionRepository,
    calls: AtomicUsize,
}

impl RecordingRepository {
    pub fn with_row(self, row: Subscription) -> Self {
        Self {
            inner: self.inner.with_row(row),
            calls: self.calls,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Subscription> {
        self.inner.snapshot()
    }
}

#[async_trait]
impl SubscriptionRepository for RecordingRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        scope: ListScope,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_for_owner(owner, scope).await
    }

    async fn insert(
        &self,
        owner: &UserId,
        subscription: &NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(owner, subscription).await
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_owned(owner, id, patch).await
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
    ) -> Result<(), SubscriptionRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_owned(owner, id).await
    }
}

/// App dependencies over the given doubles with plain-HTTP cookies.
pub fn dependencies(
    identity: Arc<RecordingIdentity>,
    repository: Arc<RecordingRepository>,
) -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(http_state_from_adapters(identity, repository)),
        renderer: web::Data::new(DashboardRenderer::new().expect("template compiles")),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}
