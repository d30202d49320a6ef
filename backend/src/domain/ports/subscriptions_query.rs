//! Driving port for subscription reads and spend statistics.

use async_trait::async_trait;

use crate::domain::{Error, SpendSummary, Subscription, UserId};

/// Read-only subscription use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsQuery: Send + Sync {
    /// Every subscription owned by `owner`, soonest billing first.
    async fn list(&self, owner: &UserId) -> Result<Vec<Subscription>, Error>;

    /// Active subscriptions owned by `owner`.
    async fn list_active(&self, owner: &UserId) -> Result<Vec<Subscription>, Error>;

    /// Spend totals across the active subscriptions of `owner`.
    async fn spend_summary(&self, owner: &UserId) -> Result<SpendSummary, Error>;
}
