//! Account registration and session sign-in handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"name":"Ada","email":"ada@example.com","password":"hunter222","role":"PERFORMER"}
//! POST /api/v1/auth/login {"email":"ada@example.com","password":"hunter222"}
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Actor, Error, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse")]
    pub password: String,
    #[schema(example = "PERFORMER")]
    pub role: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
}

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationValidationError::User(UserValidationError::InvalidEmail) => {
            field_error(message, "email", "invalid_email")
        }
        RegistrationValidationError::User(
            UserValidationError::DisplayNameTooShort { .. }
            | UserValidationError::DisplayNameTooLong { .. },
        ) => field_error(message, "name", "invalid_name"),
        RegistrationValidationError::User(UserValidationError::InvalidRole) => {
            field_error(message, "role", "invalid_role")
        }
        RegistrationValidationError::User(_) => Error::invalid_request(message),
        RegistrationValidationError::PasswordTooShort { .. } => {
            field_error(message, "password", "password_too_short")
        }
    }
}

fn map_login_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => {
            field_error(err.to_string(), "email", "invalid_email")
        }
        LoginValidationError::EmptyPassword => {
            field_error(err.to_string(), "password", "empty_password")
        }
    }
}

/// Create an account. Performers also get an empty profile.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
        role,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password, &role)
        .map_err(map_registration_error)?;
    let user_id = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "Account created successfully".to_owned(),
        user_id: user_id.to_string(),
    }))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_error)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_actor(&Actor::new(user.id, user.role))?;
    Ok(web::Json(LoginResponse { user: user.into() }))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Email, ErrorCode, Role, User, UserId};
    use crate::inbound::http::test_utils::{MockPorts, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;

    fn ada(role: Role) -> User {
        User {
            id: UserId::random(),
            name: DisplayName::new("Ada Lovelace").expect("valid name"),
            email: Email::new("ada@example.com").expect("valid email"),
            role,
            image: None,
            created_at: Utc::now(),
        }
    }

    async fn call(ports: MockPorts, request: test::TestRequest) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/v1")
                        .service(register)
                        .service(login)
                        .service(logout),
                ),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn register_returns_created_user_id() {
        let id = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .withf(|registration| {
                registration.email().as_ref() == "ada@example.com"
                    && registration.role() == Role::Performer
            })
            .times(1)
            .return_once(move |_| Ok(id));

        let response = call(
            ports,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(RegisterRequest {
                    name: "Ada Lovelace".into(),
                    email: "Ada@Example.com".into(),
                    password: "correct horse".into(),
                    role: "PERFORMER".into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: RegisterResponse = test::read_body_json(response).await;
        assert_eq!(body.user_id, id.to_string());
        assert_eq!(body.message, "Account created successfully");
    }

    #[rstest]
    #[case("A", "ada@example.com", "correct horse", "CLIENT", "name")]
    #[case("Ada", "not-an-email", "correct horse", "CLIENT", "email")]
    #[case("Ada", "ada@example.com", "short", "CLIENT", "password")]
    #[case("Ada", "ada@example.com", "correct horse", "ADMIN", "role")]
    #[actix_web::test]
    async fn register_rejects_invalid_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: &str,
        #[case] field: &str,
    ) {
        let response = call(
            MockPorts::default(),
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(RegisterRequest {
                    name: name.into(),
                    email: email.into(),
                    password: password.into(),
                    role: role.into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn login_sets_session_cookie() {
        let user = ada(Role::Client);
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .times(1)
            .return_once(move |_| Ok(user));

        let response = call(
            ports,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(LoginRequest {
                    email: "ada@example.com".into(),
                    password: "correct horse".into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
        let body: LoginResponse = test::read_body_json(response).await;
        assert_eq!(body.user.role, "CLIENT");
        assert_eq!(body.user.email, "ada@example.com");
    }

    #[rstest]
    #[actix_web::test]
    async fn login_surfaces_invalid_credentials() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));

        let response = call(
            ports,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(LoginRequest {
                    email: "ada@example.com".into(),
                    password: "wrong password".into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Error = test::read_body_json(response).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
        assert_eq!(body.message(), "invalid credentials");
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_is_no_content() {
        let response = call(
            MockPorts::default(),
            test::TestRequest::post().uri("/api/v1/auth/logout"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
