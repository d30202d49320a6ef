//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters.
//! Driven ports (`IdentityProvider`, `SubscriptionRepository`) are implemented
//! by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod identity_provider;
mod subscription_repository;
mod subscriptions_command;
mod subscriptions_query;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    ListScope, SubscriptionRepository, SubscriptionRepositoryError,
};
#[cfg(test)]
pub use subscriptions_command::MockSubscriptionsCommand;
pub use subscriptions_command::SubscriptionsCommand;
#[cfg(test)]
pub use subscriptions_query::MockSubscriptionsQuery;
pub use subscriptions_query::SubscriptionsQuery;
