//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session carries the signed-in user's id and role. Handlers ask
//! for an [`Actor`] and never touch `actix_session` directly.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Actor, Error, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user in the session cookie.
    pub fn persist_actor(&self, actor: &Actor) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, actor.id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, actor.role.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in user, if any.
    ///
    /// A cookie whose id or role no longer parses is treated as signed out.
    pub fn actor(&self) -> Result<Option<Actor>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_role)) = (read(USER_ID_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };
        let id = match UserId::new(&raw_id) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return Ok(None);
            }
        };
        match raw_role.parse::<Role>() {
            Ok(role) => Ok(Some(Actor::new(id, role))),
            Err(error) => {
                warn!(%error, "invalid role in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a signed-in user or return `401 Unauthorized`.
    pub fn require_actor(&self) -> Result<Actor, Error> {
        self.actor()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
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
