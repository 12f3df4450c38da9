//! Performer profile handlers.
//!
//! ```text
//! GET  /api/v1/profile
//! POST /api/v1/profile {"bio":"...","age":"29","rates":{"hourly":150}}
//! GET  /api/v1/profiles
//! GET  /api/v1/profiles/{performerId}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, PerformerPage, ProfileDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    ContentResponse, ProfileResponse, ProfileSummaryResponse, UserCardResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

/// Profile fields a performer may edit. Absent and blank fields are cleared.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Whole number or numeric string; blank clears the age.
    #[schema(value_type = Option<Object>, example = "29")]
    pub age: Option<Value>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub services: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub rates: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub availability: Option<Value>,
}

impl From<ProfileRequest> for ProfileDraft {
    fn from(request: ProfileRequest) -> Self {
        Self {
            bio: request.bio,
            location: request.location,
            age: request.age,
            height: request.height,
            measurements: request.measurements,
            services: request.services,
            rates: request.rates,
            availability: request.availability,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub user: UserCardResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfileEnvelope {
    pub profile: OwnProfileResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEnvelope {
    pub profile: ProfileResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileSummaryResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformerPageResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub user: UserCardResponse,
    pub content: Vec<ContentResponse>,
    pub favorites_count: i64,
    /// Present for clients only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorited: Option<bool>,
}

impl From<PerformerPage> for PerformerPageResponse {
    fn from(page: PerformerPage) -> Self {
        Self {
            profile: page.profile.into(),
            user: page.user.into(),
            content: page.content.into_iter().map(ContentResponse::from).collect(),
            favorites_count: page.favorites_count,
            is_favorited: page.is_favorited,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformerPageEnvelope {
    pub profile: PerformerPageResponse,
}

/// The signed-in performer's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Own profile", body = OwnProfileEnvelope),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a performer", body = Error),
        (status = 404, description = "Profile not found", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "getOwnProfile"
)]
#[get("/profile")]
pub async fn get_own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OwnProfileEnvelope>> {
    let actor = session.require_actor()?;
    let own = state.profiles.own_profile(&actor).await?;
    Ok(web::Json(OwnProfileEnvelope {
        profile: OwnProfileResponse {
            profile: own.profile.into(),
            user: own.user.into(),
        },
    }))
}

/// Create or update the signed-in performer's profile.
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Saved profile", body = ProfileEnvelope),
        (status = 400, description = "Invalid profile fields", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a performer", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "upsertOwnProfile"
)]
#[post("/profile")]
pub async fn upsert_own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileEnvelope>> {
    let actor = session.require_actor()?;
    let profile = state
        .profiles
        .upsert_profile(&actor, payload.into_inner().into())
        .await?;
    Ok(web::Json(ProfileEnvelope {
        profile: profile.into(),
    }))
}

/// Performer directory, featured profiles first.
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    responses(
        (status = 200, description = "Performer profiles", body = ProfileListResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "listProfiles"
)]
#[get("/profiles")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileListResponse>> {
    session.require_actor()?;
    let summaries = state.profiles.list_performers().await?;
    Ok(web::Json(ProfileListResponse {
        profiles: summaries
            .into_iter()
            .map(ProfileSummaryResponse::from)
            .collect(),
    }))
}

/// Public page of one performer, keyed by the performer's user id.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{performerId}",
    params(("performerId" = String, Path, description = "Performer user id")),
    responses(
        (status = 200, description = "Performer page", body = PerformerPageEnvelope),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile not found", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "getPerformerProfile"
)]
#[get("/profiles/{performer_id}")]
pub async fn get_performer_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PerformerPageEnvelope>> {
    let actor = session.require_actor()?;
    let performer = parse_user_id(&path.into_inner(), FieldName::new("performerId"))?;
    let page = state.profiles.performer_page(&actor, &performer).await?;
    Ok(web::Json(PerformerPageEnvelope {
        profile: page.into(),
    }))
}
