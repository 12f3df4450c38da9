//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint under `/api/v1`, the health
//! checks, and the session cookie security scheme. Swagger UI serves it in
//! debug builds; `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::{
    auth, bookings, content, dashboard, favorites, health, messages, payments, profiles, users,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Encore API",
        description = "Performer profiles, content, bookings, payments and messaging."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        users::current_user,
        users::update_image,
        users::get_user,
        profiles::get_own_profile,
        profiles::upsert_own_profile,
        profiles::list_profiles,
        profiles::get_performer_profile,
        content::create_content,
        content::list_content,
        content::delete_content,
        content::view_content,
        content::like_content,
        content::unlike_content,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::update_booking_status,
        payments::create_checkout,
        payments::webhook,
        messages::send_message,
        messages::list_messages,
        messages::mark_read,
        messages::list_conversations,
        favorites::add_favorite,
        favorites::remove_favorite,
        favorites::list_favorites,
        dashboard::get_dashboard,
        dashboard::get_earnings,
        health::ready,
        health::live,
    ),
    components(schemas(crate::domain::Error, crate::domain::ErrorCode)),
    tags(
        (name = "auth", description = "Registration and session sign-in"),
        (name = "users", description = "Account details and user cards"),
        (name = "profiles", description = "Performer profiles and the directory"),
        (name = "content", description = "Performer photos and engagement counters"),
        (name = "bookings", description = "Booking requests and status lifecycle"),
        (name = "payments", description = "Hosted checkout and processor webhook"),
        (name = "messages", description = "Direct messages"),
        (name = "favorites", description = "Client favorites"),
        (name = "dashboard", description = "Role-specific statistics and earnings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
