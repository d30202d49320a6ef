//! In-process adapters used when no hosted store is configured.
//!
//! These keep development builds usable without credentials and give tests a
//! deterministic backend. State is lost when the process exits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Map;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, ListScope, SubscriptionRepository,
    SubscriptionRepositoryError,
};
use crate::domain::{
    AuthenticatedUser, Credentials, NewSubscription, Subscription, SubscriptionId,
    SubscriptionPatch, UserId,
};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    id: UserId,
    password: Zeroizing<String>,
}

/// Identity provider keeping accounts in memory.
///
/// Mirrors the hosted provider's observable rules closely enough for local
/// use: unique emails, a minimum password length, and generic credential
/// rejections.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryIdentityProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    fn accounts(&self) -> Result<MutexGuard<'_, HashMap<String, Account>>, IdentityProviderError> {
        self.accounts
            .lock()
            .map_err(|_| IdentityProviderError::transport("in-memory account store poisoned"))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), IdentityProviderError> {
        let email = credentials.email().trim().to_lowercase();
        if !email.contains('@') {
            return Err(IdentityProviderError::rejected(
                "Unable to validate email address: invalid format",
            ));
        }
        if credentials.password().chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityProviderError::rejected(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters."
            )));
        }

        let mut accounts = self.accounts()?;
        if accounts.contains_key(&email) {
            return Err(IdentityProviderError::rejected("User already registered"));
        }
        let id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        accounts.insert(
            email,
            Account {
                id,
                password: Zeroizing::new(credentials.password().to_owned()),
            },
        );
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        let email = credentials.email().trim().to_lowercase();
        let accounts = self.accounts()?;
        match accounts.get(&email) {
            Some(account) if account.password.as_str() == credentials.password() => {
                Ok(AuthenticatedUser::new(account.id.clone(), email))
            }
            _ => Err(IdentityProviderError::rejected("Invalid login credentials")),
        }
    }
}

#[derive(Default)]
struct Table {
    rows: Vec<Subscription>,
    next_id: i64,
}

/// Subscription repository keeping rows in memory.
///
/// Identifiers are sequential integers, as a bigint primary key would be.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    table: Mutex<Table>,
}

impl InMemorySubscriptionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row as if it had been inserted directly into the store.
    pub fn with_row(self, row: Subscription) -> Self {
        if let Ok(mut table) = self.table.lock() {
            if let Ok(numeric) = row.id.as_ref().parse::<i64>() {
                table.next_id = table.next_id.max(numeric);
            }
            table.rows.push(row);
        }
        self
    }

    /// Copy of every stored row regardless of owner.
    pub fn snapshot(&self) -> Vec<Subscription> {
        self.table
            .lock()
            .map(|table| table.rows.clone())
            .unwrap_or_default()
    }

    fn table(&self) -> Result<MutexGuard<'_, Table>, SubscriptionRepositoryError> {
        self.table
            .lock()
            .map_err(|_| SubscriptionRepositoryError::transport("in-memory table poisoned"))
    }
}

fn owned<'a>(owner: &'a UserId, id: &'a SubscriptionId) -> impl Fn(&Subscription) -> bool + 'a {
    move |row| &row.user_id == owner && &row.id == id
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        scope: ListScope,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let table = self.table()?;
        let mut rows: Vec<Subscription> = table
            .rows
            .iter()
            .filter(|row| &row.user_id == owner)
            .filter(|row| scope == ListScope::All || row.is_active)
            .cloned()
            .collect();
        // Ascending with undated rows last, matching the store's default.
        rows.sort_by_key(|row| (row.next_billing_date.is_none(), row.next_billing_date));
        Ok(rows)
    }

    async fn insert(
        &self,
        owner: &UserId,
        subscription: &NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        let mut table = self.table()?;
        table.next_id += 1;
        let row = Subscription {
            id: SubscriptionId::from_integer(table.next_id),
            user_id: owner.clone(),
            name: subscription.name.clone(),
            price: subscription.price,
            billing_cycle: subscription.billing_cycle.clone(),
            next_billing_date: Some(subscription.next_billing_date),
            is_active: subscription.is_active,
            extra: Map::new(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let mut table = self.table()?;
        let matches = owned(owner, id);
        Ok(table.rows.iter_mut().find(|row| matches(&**row)).map(|row| {
            patch.apply_to(row);
            row.clone()
        }))
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &SubscriptionId,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut table = self.table()?;
        let matches = owned(owner, id);
        table.rows.retain(|row| !matches(row));
        Ok(())
    }
}
