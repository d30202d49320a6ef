//! Shared reqwest plumbing for the hosted store.
//!
//! Both the identity and table adapters talk to the same project URL with the
//! same API key; this module owns the client, header stamping, and the mapping
//! from HTTP failures onto port errors.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::ProviderErrorDto;
use crate::domain::ports::{IdentityProviderError, SubscriptionRepositoryError};

/// Connection settings shared by the store adapters.
#[derive(Clone)]
pub struct StoreConnection {
    client: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl std::fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConnection")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StoreConnection {
    /// Build a connection for the project at `base_url`.
    ///
    /// No request timeout is applied unless `timeout` is given.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: with_trailing_slash(base_url),
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    /// Resolve `path` relative to the project URL.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, StoreFailure> {
        self.base_url
            .join(path)
            .map_err(|err| StoreFailure::Transport(format!("invalid store endpoint {path}: {err}")))
    }

    /// Attach the project API key in both headers the store expects.
    pub(super) fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key.as_str()),
            )
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send an authorised request and return the body of a 2xx response.
    pub(super) async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, StoreFailure> {
        let response = self
            .authorise(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Transport-level failure shared by the identity and table adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum StoreFailure {
    Rejected(String),
    Transport(String),
    Timeout(String),
    Decode(String),
}

impl From<StoreFailure> for IdentityProviderError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Rejected(message) => Self::rejected(message),
            StoreFailure::Transport(message) => Self::transport(message),
            StoreFailure::Timeout(message) => Self::timeout(message),
            StoreFailure::Decode(message) => Self::decode(message),
        }
    }
}

impl From<StoreFailure> for SubscriptionRepositoryError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Rejected(message) => Self::rejected(message),
            StoreFailure::Transport(message) => Self::transport(message),
            StoreFailure::Timeout(message) => Self::timeout(message),
            StoreFailure::Decode(message) => Self::decode(message),
        }
    }
}

/// Decode a JSON body into `T`, tagging failures with `what`.
pub(super) fn decode_json<T: serde::de::DeserializeOwned>(
    body: &[u8],
    what: &str,
) -> Result<T, StoreFailure> {
    serde_json::from_slice(body)
        .map_err(|err| StoreFailure::Decode(format!("invalid {what} payload: {err}")))
}

fn map_transport_error(error: reqwest::Error) -> StoreFailure {
    if error.is_timeout() {
        StoreFailure::Timeout(error.to_string())
    } else {
        StoreFailure::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreFailure {
    let provider_message = serde_json::from_slice::<ProviderErrorDto>(body)
        .ok()
        .and_then(ProviderErrorDto::into_message);
    let message = provider_message.unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {}", status.as_u16(), preview)
        }
    });

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => StoreFailure::Timeout(message),
        _ if status.is_client_error() => StoreFailure::Rejected(message),
        _ => StoreFailure::Transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
