//! Subscription repository adapter for the hosted store's table endpoints.
//!
//! Rows live behind a PostgREST-style interface at `/rest/v1/<table>`. Every
//! call carries an `user_id=eq.<owner>` filter so ownership is enforced by the
//! store query itself.

use async_trait::async_trait;
use reqwest::RequestBuilder;

use super::client::{StoreConnection, StoreFailure, decode_json};
use super::dto::{InsertRowDto, PatchRowDto};
use crate::domain::ports::{ListScope, SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch, UserId};

const RETURN_REPRESENTATION: &str = "return=representation";

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// [`SubscriptionRepository`] backed by the store's table API.
#[derive(Debug, Clone)]
pub struct StoreSubscriptionRepository {
    connection: StoreConnection,
    table_path: String,
}

impl StoreSubscriptionRepository {
    /// Create an adapter for `table` sharing `connection`.
    pub fn new(connection: StoreConnection, table: &str) -> Self {
        Self {
            connection,
            table_path: format!("rest/v1/{table}"),
        }
    }

    fn owned_rows(
        &self,
        method: reqwest::Method,
        owner: &UserId,
        id: &SubscriptionId,
    ) -> Result<RequestBuilder, StoreFailure> {
        let url = self.connection.endpoint(&self.table_path)?;
        Ok(self.connection.client().request(method, url).query(&[
            ("id", eq_filter(id.as_ref())),
            ("user_id", eq_filter(owner.as_ref())),
        ]))
    }
}

#[async_trait]
impl SubscriptionRepository for StoreSubscriptionRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        scope: ListScope,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let url = self.connection.endpoint(&self.table_path)?;
        let mut query = vec![
            ("select", "*".to_owned()),
            ("user_id", eq_filter(owner.as_ref())),
        ];
        if scope == ListScope::ActiveOnly {
            query.push(("is_active", eq_filter("true")));
        }
        query.push(("order", "next_billing_date.asc".to_owned()));

        let request = self.connection.client().get(url).query(&query);
        let body = self.connection.execute(request).await?;
        Ok(decode_json(&body, "subscription list")?)
    }

    async fn insert(
        &self,
        owner: &UserId,
        subscription: &NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        let url = self.connection.endpoint(&self.table_path)?;
        let request = self
            .connection
            .client()
            .post(url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&InsertRowDto::new(owner, subscription));
        let body = self.connection.execute(request).await?;
        let rows: Vec<Subscription> = decode_json(&body, "inserted subscription")?;
        rows.into_iter().next().ok_or_else(|| {
            SubscriptionRepositoryError::decode("insert returned no rows")
        })
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let request = self
            .owned_rows(reqwest::Method::PATCH, owner, id)?
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&PatchRowDto::from(patch));
        let body = self.connection.execute(request).await?;
        let rows: Vec<Subscription> = decode_json(&body, "updated subscription")?;
        Ok(rows.into_iter().next())
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
    ) -> Result<(), SubscriptionRepositoryError> {
        let request = self.owned_rows(reqwest::Method::DELETE, owner, id)?;
        self.connection.execute(request).await?;
        Ok(())
    }
}
