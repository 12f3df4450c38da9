//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};
use actix_http::Request;
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, Error, Role, UserId};
use crate::inbound::http::session::SessionContext;

/// Path of the sign-in shortcut mounted by [`test_sign_in_route`].
pub const TEST_SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per call, names the cookie `session` and disables the
/// `Secure` flag for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

#[derive(Serialize, Deserialize)]
struct SignIn {
    id: String,
    role: Role,
}

async fn sign_in(session: SessionContext, body: web::Json<SignIn>) -> Result<HttpResponse, Error> {
    let SignIn { id, role } = body.into_inner();
    let id = UserId::new(id).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_actor(&Actor::new(id, role))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route that stores the posted actor in the session, bypassing credentials.
pub fn test_sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route(TEST_SIGN_IN_PATH, web::post().to(sign_in));
}

/// Sign `actor` in through [`TEST_SIGN_IN_PATH`] and return the session cookie.
///
/// # Panics
///
/// Panics when the app does not mount the sign-in route.
pub async fn session_cookie_for<S, B>(app: &S, actor: &Actor) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(TEST_SIGN_IN_PATH)
        .set_json(SignIn {
            id: actor.id.to_string(),
            role: actor.role,
        })
        .to_request();
    let response = test::call_service(app, request).await;
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("sign-in sets a session cookie")
}

pub(crate) use self::mocks::MockPorts;

mod mocks {
    use std::sync::Arc;

    use actix_web::web;

    use crate::domain::ports::{
        MockAccountService, MockBookingService, MockContentService, MockDashboardService,
        MockFavoriteService, MockMessagingService, MockPaymentService, MockProfileService,
    };
    use crate::inbound::http::state::HttpState;

    /// One mock per driving port; tests set expectations on the ones they use.
    #[derive(Default)]
    pub(crate) struct MockPorts {
        pub accounts: MockAccountService,
        pub profiles: MockProfileService,
        pub content: MockContentService,
        pub bookings: MockBookingService,
        pub payments: MockPaymentService,
        pub messages: MockMessagingService,
        pub favorites: MockFavoriteService,
        pub dashboard: MockDashboardService,
    }

    impl MockPorts {
        pub(crate) fn into_state(self) -> web::Data<HttpState> {
            web::Data::new(HttpState {
                accounts: Arc::new(self.accounts),
                profiles: Arc::new(self.profiles),
                content: Arc::new(self.content),
                bookings: Arc::new(self.bookings),
                payments: Arc::new(self.payments),
                messages: Arc::new(self.messages),
                favorites: Arc::new(self.favorites),
                dashboard: Arc::new(self.dashboard),
            })
        }
    }
}
