//! HTTP inbound adapter exposing the JSON API and the dashboard page.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod stats;
pub(crate) mod subscription_payload;
pub mod subscriptions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
