//! Subscription domain service.
//!
//! Implements the subscription driving ports over a
//! [`SubscriptionRepository`]. Ownership is always passed through to the
//! repository so every read and write stays scoped to the session user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    ListScope, SubscriptionRepository, SubscriptionRepositoryError, SubscriptionsCommand,
    SubscriptionsQuery,
};
use crate::domain::stats::summarise;
use crate::domain::{
    Error, NewSubscription, SpendSummary, Subscription, SubscriptionId, SubscriptionPatch, UserId,
};

/// Subscription service implementing the command and query ports.
#[derive(Clone)]
pub struct SubscriptionService<R> {
    repository: Arc<R>,
}

impl<R> SubscriptionService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(operation: &'static str, error: SubscriptionRepositoryError) -> Error {
    warn!(operation, error = %error, "subscription store call failed");
    Error::upstream(error.to_string())
}

#[async_trait]
impl<R> SubscriptionsCommand for SubscriptionService<R>
where
    R: SubscriptionRepository,
{
    async fn create(
        &self,
        owner: &UserId,
        subscription: NewSubscription,
    ) -> Result<Subscription, Error> {
        self.repository
            .insert(owner, &subscription)
            .await
            .map_err(|err| map_repository_error("insert", err))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Option<Subscription>, Error> {
        let updated = self
            .repository
            .update_owned(owner, id, &patch)
            .await
            .map_err(|err| map_repository_error("update", err))?;
        if updated.is_none() {
            debug!(subscription_id = %id, "update matched no owned row");
        }
        Ok(updated)
    }

    async fn delete(&self, owner: &UserId, id: &SubscriptionId) -> Result<(), Error> {
        self.repository
            .delete_owned(owner, id)
            .await
            .map_err(|err| map_repository_error("delete", err))
    }
}

#[async_trait]
impl<R> SubscriptionsQuery for SubscriptionService<R>
where
    R: SubscriptionRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Subscription>, Error> {
        self.repository
            .list_for_owner(owner, ListScope::All)
            .await
            .map_err(|err| map_repository_error("list", err))
    }

    async fn list_active(&self, owner: &UserId) -> Result<Vec<Subscription>, Error> {
        self.repository
            .list_for_owner(owner, ListScope::ActiveOnly)
            .await
            .map_err(|err| map_repository_error("list_active", err))
    }

    async fn spend_summary(&self, owner: &UserId) -> Result<SpendSummary, Error> {
        let active = self.list_active(owner).await?;
        summarise(&active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockSubscriptionRepository;
    use crate::domain::{BillingCycle, ErrorCode};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use serde_json::Map;
    use std::str::FromStr;

    fn owner() -> UserId {
        UserId::new("owner-1").expect("user id")
    }

    fn row(id: &str, price: &str, cycle: BillingCycle) -> Subscription {
        Subscription {
            id: SubscriptionId::new(id).expect("id"),
            user_id: owner(),
            name: None,
            price: Decimal::from_str(price).expect("price"),
            billing_cycle: cycle,
            next_billing_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            is_active: true,
            extra: Map::new(),
        }
    }

    fn service(repo: MockSubscriptionRepository) -> SubscriptionService<MockSubscriptionRepository> {
        SubscriptionService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn list_requests_all_rows_for_owner() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_list_for_owner()
            .with(eq(owner()), eq(ListScope::All))
            .times(1)
            .return_once(|_, _| Ok(vec![row("1", "9.99", BillingCycle::Monthly)]));

        let rows = service(repo).list(&owner()).await.expect("list succeeds");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn spend_summary_reads_active_rows_only() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_list_for_owner()
            .with(eq(owner()), eq(ListScope::ActiveOnly))
            .times(1)
            .return_once(|_, _| {
                Ok(vec![
                    row("1", "9.99", BillingCycle::Monthly),
                    row("2", "120", BillingCycle::Yearly),
                    row("3", "5", BillingCycle::Weekly),
                ])
            });

        let summary = service(repo)
            .spend_summary(&owner())
            .await
            .expect("summary succeeds");
        assert_eq!(summary.total_subscriptions, 3);
        assert_eq!(summary.monthly_total, Decimal::from_str("39.99").expect("dec"));
        assert_eq!(summary.yearly_total, Decimal::from_str("479.88").expect("dec"));
    }

    #[tokio::test]
    async fn spend_summary_reports_overflowing_stored_prices() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_list_for_owner().return_once(|_, _| {
            Ok(vec![row(
                "1",
                "79228162514264337593543950335",
                BillingCycle::Weekly,
            )])
        });

        let err = service(repo)
            .spend_summary(&owner())
            .await
            .expect_err("overflow is an error");
        assert_eq!(err.code(), ErrorCode::UpstreamError);
    }

    #[tokio::test]
    async fn update_passes_through_missing_rows() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_update_owned().return_once(|_, _, _| Ok(None));

        let patch = SubscriptionPatch {
            is_active: Some(false),
            ..SubscriptionPatch::default()
        };
        let result = service(repo)
            .update(&owner(), &SubscriptionId::new("99").expect("id"), patch)
            .await
            .expect("update succeeds");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn store_failures_become_upstream_errors() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_delete_owned()
            .return_once(|_, _| Err(SubscriptionRepositoryError::rejected("permission denied")));

        let err = service(repo)
            .delete(&owner(), &SubscriptionId::new("1").expect("id"))
            .await
            .expect_err("delete fails");
        assert_eq!(err.code(), ErrorCode::UpstreamError);
        assert_eq!(err.message(), "permission denied");
    }

    #[tokio::test]
    async fn create_forwards_owner_and_fields() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_insert()
            .withf(|owner_id, new| owner_id.as_ref() == "owner-1" && new.is_active)
            .times(1)
            .return_once(|_, _| Ok(row("7", "4.50", BillingCycle::Weekly)));

        let new = NewSubscription {
            name: Some("Gym".into()),
            price: Decimal::from_str("4.50").expect("price"),
            billing_cycle: BillingCycle::Weekly,
            next_billing_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
            is_active: true,
        };
        let created = service(repo)
            .create(&owner(), new)
            .await
            .expect("create succeeds");
        assert_eq!(created.id.as_ref(), "7");
    }
}
