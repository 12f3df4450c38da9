//! Performer content handlers and engagement counters.
//!
//! ```text
//! POST   /api/v1/content {"profileId":"...","url":"https://cdn.example/1.jpg"}
//! GET    /api/v1/content?profileId=...
//! DELETE /api/v1/content/{id}
//! POST   /api/v1/content/{id}/view
//! POST   /api/v1/content/{id}/like
//! DELETE /api/v1/content/{id}/like
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{ContentDraft, CounterChange, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{ContentResponse, CountersResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_amount, parse_uuid, require};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentRequest {
    pub profile_id: Option<String>,
    /// Only `photo` is accepted; defaults to `photo`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    /// Major currency units.
    pub price: Option<f64>,
}

impl CreateContentRequest {
    fn into_draft(self) -> Result<ContentDraft, Error> {
        let profile_id = require(self.profile_id, FieldName::new("profileId"))?;
        let url = require(self.url, FieldName::new("url"))?;
        let price = self
            .price
            .map(|price| parse_amount(price, FieldName::new("price")))
            .transpose()?;
        Ok(ContentDraft {
            profile_id: parse_uuid(&profile_id, FieldName::new("profileId"))?,
            kind: self.kind,
            url,
            thumbnail: self.thumbnail,
            title: self.title,
            description: self.description,
            is_premium: self.is_premium,
            price,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ContentQuery {
    /// Required for clients; performers always see their own profile.
    pub profile_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContentEnvelope {
    pub content: ContentResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContentListResponse {
    pub content: Vec<ContentResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CountersEnvelope {
    pub content: CountersResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LikeResponse {
    pub content: CountersResponse,
    pub liked: bool,
}

fn content_id(path: web::Path<String>) -> Result<Uuid, Error> {
    parse_uuid(&path.into_inner(), FieldName::new("id"))
}

/// Publish a photo on the caller's profile.
#[utoipa::path(
    post,
    path = "/api/v1/content",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Created", body = ContentEnvelope),
        (status = 400, description = "Invalid content", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the profile owner", body = Error),
        (status = 404, description = "Profile not found", body = Error)
    ),
    tags = ["content"],
    operation_id = "createContent"
)]
#[post("/content")]
pub async fn create_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateContentRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let draft = payload.into_inner().into_draft()?;
    let content = state.content.create(&actor, draft).await?;
    Ok(HttpResponse::Created().json(ContentEnvelope {
        content: content.into(),
    }))
}

/// List content of a profile, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/content",
    params(ContentQuery),
    responses(
        (status = 200, description = "Content items", body = ContentListResponse),
        (status = 400, description = "profileId missing for a client", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Performer has no profile", body = Error)
    ),
    tags = ["content"],
    operation_id = "listContent"
)]
#[get("/content")]
pub async fn list_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ContentQuery>,
) -> ApiResult<web::Json<ContentListResponse>> {
    let actor = session.require_actor()?;
    let profile_id = query
        .into_inner()
        .profile_id
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_uuid(&raw, FieldName::new("profileId")))
        .transpose()?;
    let items = state.content.list(&actor, profile_id).await?;
    Ok(web::Json(ContentListResponse {
        content: items.into_iter().map(ContentResponse::from).collect(),
    }))
}

/// Remove one of the caller's content items.
#[utoipa::path(
    delete,
    path = "/api/v1/content/{id}",
    params(("id" = String, Path, description = "Content id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Content not found", body = Error)
    ),
    tags = ["content"],
    operation_id = "deleteContent"
)]
#[delete("/content/{id}")]
pub async fn delete_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let id = content_id(path)?;
    state.content.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Count a view. Clients only.
#[utoipa::path(
    post,
    path = "/api/v1/content/{id}/view",
    params(("id" = String, Path, description = "Content id")),
    responses(
        (status = 200, description = "Updated counters", body = CountersEnvelope),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error),
        (status = 404, description = "Content not found", body = Error)
    ),
    tags = ["content"],
    operation_id = "viewContent"
)]
#[post("/content/{id}/view")]
pub async fn view_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CountersEnvelope>> {
    let actor = session.require_actor()?;
    let id = content_id(path)?;
    let counters = state.content.engage(&actor, &id, CounterChange::View).await?;
    Ok(web::Json(CountersEnvelope {
        content: counters.into(),
    }))
}

async fn apply_like(
    state: &HttpState,
    session: &SessionContext,
    path: web::Path<String>,
    change: CounterChange,
) -> ApiResult<web::Json<LikeResponse>> {
    let actor = session.require_actor()?;
    let id = content_id(path)?;
    let counters = state.content.engage(&actor, &id, change).await?;
    Ok(web::Json(LikeResponse {
        content: counters.into(),
        liked: matches!(change, CounterChange::Like),
    }))
}

/// Like a content item. Clients only.
#[utoipa::path(
    post,
    path = "/api/v1/content/{id}/like",
    params(("id" = String, Path, description = "Content id")),
    responses(
        (status = 200, description = "Updated counters", body = LikeResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error),
        (status = 404, description = "Content not found", body = Error)
    ),
    tags = ["content"],
    operation_id = "likeContent"
)]
#[post("/content/{id}/like")]
pub async fn like_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikeResponse>> {
    apply_like(&state, &session, path, CounterChange::Like).await
}

/// Withdraw a like; the count never drops below zero. Clients only.
#[utoipa::path(
    delete,
    path = "/api/v1/content/{id}/like",
    params(("id" = String, Path, description = "Content id")),
    responses(
        (status = 200, description = "Updated counters", body = LikeResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error),
        (status = 404, description = "Content not found", body = Error)
    ),
    tags = ["content"],
    operation_id = "unlikeContent"
)]
#[delete("/content/{id}/like")]
pub async fn unlike_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikeResponse>> {
    apply_like(&state, &session, path, CounterChange::Unlike).await
}
