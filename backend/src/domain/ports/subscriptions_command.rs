//! Driving port for subscription mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, NewSubscription, Subscription, SubscriptionId, SubscriptionPatch, UserId,
};

/// Subscription writes performed on behalf of a signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsCommand: Send + Sync {
    /// Create a subscription owned by `owner`.
    async fn create(
        &self,
        owner: &UserId,
        subscription: NewSubscription,
    ) -> Result<Subscription, Error>;

    /// Patch a subscription owned by `owner`.
    ///
    /// A missing or foreign row yields `Ok(None)` rather than an error.
    async fn update(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Option<Subscription>, Error>;

    /// Delete a subscription owned by `owner`; succeeds even when nothing matched.
    async fn delete(&self, owner: &UserId, id: &SubscriptionId) -> Result<(), Error>;
}
