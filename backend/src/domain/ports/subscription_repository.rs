//! Driven port for subscription rows in the external table store.
//!
//! Every operation is scoped to an owner: adapters must apply the owner as a
//! query filter so rows belonging to other users are neither returned nor
//! modified.

use async_trait::async_trait;

use crate::domain::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscription store adapters.
    pub enum SubscriptionRepositoryError {
        /// The store refused the request.
        Rejected { message: String } => "{message}",
        /// The store could not be reached.
        Transport { message: String } => "subscription store unavailable: {message}",
        /// The store did not answer in time.
        Timeout { message: String } => "subscription store timed out: {message}",
        /// The store answered with rows the service cannot read.
        Decode { message: String } => "subscription store returned an invalid response: {message}",
    }
}

/// Which rows a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every row owned by the user.
    All,
    /// Only rows with `is_active = true`.
    ActiveOnly,
}

/// Owner-scoped access to subscription rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Rows owned by `owner`, ascending by `next_billing_date`.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        scope: ListScope,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;

    /// Insert a row stamped with `owner` and return it as stored.
    async fn insert(
        &self,
        owner: &UserId,
        subscription: &NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError>;

    /// Patch the row matching both `id` and `owner`.
    ///
    /// Returns `None` when no such row exists.
    async fn update_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError>;

    /// Delete the row matching both `id` and `owner`. Missing rows are not an error.
    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
    ) -> Result<(), SubscriptionRepositoryError>;
}
