//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries two keys: `user` (the email shown as display
//! name) and `user_id` (the provider identifier every store query is scoped
//! to). Handlers only see the typed operations below.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AuthenticatedUser, Error, UserId};

pub(crate) const USER_KEY: &str = "user";
pub(crate) const USER_ID_KEY: &str = "user_id";

/// Message returned when a route needs a signed-in user.
pub const NOT_LOGGED_IN: &str = "Not logged in";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `user`.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_KEY, user.email())
            .and_then(|()| self.0.insert(USER_ID_KEY, user.id().as_ref()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in user id, if any.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(id.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                None
            }
        }))
    }

    /// Display name stored at login, if any.
    pub fn display_name(&self) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(USER_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Require a signed-in user or fail with `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized(NOT_LOGGED_IN))
    }

    /// Drop every session key and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
