//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use crate::inbound::http::session_config::{BuildMode, SessionSettings};
use crate::settings::StoreSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Option<StoreSettings>,
    pub(crate) build_mode: BuildMode,
}

impl ServerConfig {
    /// Configuration with no store attached.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            store: None,
            build_mode: BuildMode::from_debug_assertions(),
        }
    }

    /// Attach the hosted store used by the identity and subscription adapters.
    #[must_use]
    pub fn with_store(mut self, store: Option<StoreSettings>) -> Self {
        self.store = store;
        self
    }

    /// Override the build mode deciding whether the in-memory store is allowed.
    #[must_use]
    pub fn with_build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
