//! Domain primitives, services, and ports.
//!
//! Nothing here knows about HTTP or the hosted store. Inbound adapters call
//! the driving ports; outbound adapters implement the driven ones.

mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod stats;
pub mod subscription;
mod subscription_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, REGISTRATION_CONFIRMATION};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::stats::{SpendSummary, summarise};
pub use self::subscription::{
    BillingCycle, NewSubscription, Subscription, SubscriptionId, SubscriptionIdValidationError,
    SubscriptionPatch,
};
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::TraceId;
pub use self::user::{AuthenticatedUser, UserId, UserIdValidationError};
