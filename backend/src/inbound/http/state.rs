//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only depend on the
//! driving ports, so they remain testable without network access.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, SubscriptionsCommand, SubscriptionsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub subscriptions: Arc<dyn SubscriptionsCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionsQuery>,
}

impl HttpState {
    /// Bundle the port implementations.
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        subscriptions: Arc<dyn SubscriptionsCommand>,
        subscriptions_query: Arc<dyn SubscriptionsQuery>,
    ) -> Self {
        Self {
            accounts,
            subscriptions,
            subscriptions_query,
        }
    }
}
