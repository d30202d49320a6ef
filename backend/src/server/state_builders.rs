//! Builders wiring outbound adapters into the HTTP state.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{IdentityProvider, SubscriptionRepository};
use crate::domain::{AccountService, SubscriptionService};
use crate::inbound::http::session_config::BuildMode;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryIdentityProvider, InMemorySubscriptionRepository};
use crate::outbound::store::{StoreConnection, StoreIdentityProvider, StoreSubscriptionRepository};

use super::ServerConfig;

/// Wrap a pair of driven adapters in the domain services the handlers use.
pub fn http_state_from_adapters<P, R>(identity: Arc<P>, repository: Arc<R>) -> HttpState
where
    P: IdentityProvider + 'static,
    R: SubscriptionRepository + 'static,
{
    let subscriptions = Arc::new(SubscriptionService::new(repository));
    HttpState::new(
        Arc::new(AccountService::new(identity)),
        subscriptions.clone(),
        subscriptions,
    )
}

/// Build the handler state from configuration.
///
/// Uses the hosted store when configured. Without one, debug builds fall
/// back to in-memory adapters and release builds refuse to start.
///
/// # Errors
///
/// Returns [`io::Error`] when the store client cannot be built or no store is
/// configured in a release build.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    match &config.store {
        Some(store) => {
            let connection =
                StoreConnection::new(store.url.clone(), store.api_key.clone(), store.timeout)
                    .map_err(|err| io::Error::other(format!("failed to build store client: {err}")))?;
            info!(store = %store.url, table = %store.subscriptions_table, "using hosted store");
            Ok(http_state_from_adapters(
                Arc::new(StoreIdentityProvider::new(connection.clone())),
                Arc::new(StoreSubscriptionRepository::new(
                    connection,
                    &store.subscriptions_table,
                )),
            ))
        }
        None if config.build_mode == BuildMode::Debug => {
            warn!("no store configured; accounts and subscriptions are kept in memory");
            Ok(http_state_from_adapters(
                Arc::new(InMemoryIdentityProvider::new()),
                Arc::new(InMemorySubscriptionRepository::new()),
            ))
        }
        None => Err(io::Error::other(
            "SUBTRACK_STORE_URL and SUBTRACK_STORE_API_KEY are required in release builds",
        )),
    }
}
