//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file, or an
//! environment variable prefixed with `SUBTRACK_` (for example
//! `SUBTRACK_STORE_URL`).

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SUBSCRIPTIONS_TABLE: &str = "subscriptions";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid store URL '{value}': {source}")]
    StoreUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("SUBTRACK_STORE_URL and SUBTRACK_STORE_API_KEY must be set together")]
    PartialStore,
}

/// Connection details for the hosted store.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub url: Url,
    pub api_key: String,
    pub timeout: Option<Duration>,
    pub subscriptions_table: String,
}

/// Server and store configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUBTRACK")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL of the hosted store.
    pub store_url: Option<String>,
    /// API key sent with every store request.
    pub store_api_key: Option<String>,
    /// Per-request timeout for store calls, in seconds.
    pub store_timeout_secs: Option<u64>,
    /// Table holding subscription rows.
    pub subscriptions_table: Option<String>,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn subscriptions_table(&self) -> &str {
        self.subscriptions_table
            .as_deref()
            .unwrap_or(DEFAULT_SUBSCRIPTIONS_TABLE)
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout_secs.map(Duration::from_secs)
    }

    /// Store connection details, or `None` when no store is configured.
    pub fn store(&self) -> Result<Option<StoreSettings>, SettingsError> {
        let (raw_url, api_key) = match (&self.store_url, &self.store_api_key) {
            (None, None) => return Ok(None),
            (Some(url), Some(key)) => (url, key),
            _ => return Err(SettingsError::PartialStore),
        };
        let url = Url::parse(raw_url).map_err(|source| SettingsError::StoreUrl {
            value: raw_url.clone(),
            source,
        })?;
        Ok(Some(StoreSettings {
            url,
            api_key: api_key.clone(),
            timeout: self.store_timeout(),
            subscriptions_table: self.subscriptions_table().to_owned(),
        }))
    }
}
