//! Account handlers for the signed-in user and public user cards.
//!
//! ```text
//! GET   /api/v1/users/me
//! PATCH /api/v1/users/me/image {"image":"https://cdn.example/ada.jpg"}
//! GET   /api/v1/users/{id}
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{UserCardResponse, UserResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id, require};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    #[schema(example = "https://cdn.example/ada.jpg")]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCardEnvelope {
    pub user: UserCardResponse,
}

/// The signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserEnvelope),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserEnvelope>> {
    let actor = session.require_actor()?;
    let user = state.accounts.current_user(&actor.id).await?;
    Ok(web::Json(UserEnvelope { user: user.into() }))
}

/// Replace the signed-in user's avatar URL.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me/image",
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Updated user", body = UserEnvelope),
        (status = 400, description = "Image is missing or not an absolute URL", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUserImage"
)]
#[patch("/users/me/image")]
pub async fn update_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateImageRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let actor = session.require_actor()?;
    let image = require(payload.into_inner().image, FieldName::new("image"))?;
    let user = state.accounts.update_image(&actor.id, &image).await?;
    Ok(web::Json(UserEnvelope { user: user.into() }))
}

/// Public card of any user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User card", body = UserCardEnvelope),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserCardEnvelope>> {
    session.require_actor()?;
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let card = state.accounts.user_card(&id).await?;
    Ok(web::Json(UserCardEnvelope { user: card.into() }))
}
