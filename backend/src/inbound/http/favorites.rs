//! Client favorites.
//!
//! ```text
//! POST   /api/v1/favorites {"profileId":"..."}
//! DELETE /api/v1/favorites {"profileId":"..."}
//! GET    /api/v1/favorites
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Favorite, FavoriteEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::ProfileSummaryResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub profile_id: Option<String>,
}

impl FavoriteRequest {
    fn profile_id(self) -> Result<Uuid, Error> {
        let raw = require(self.profile_id, FieldName::new("profileId"))?;
        parse_uuid(&raw, FieldName::new("profileId"))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub user_id: String,
    pub profile_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id.to_string(),
            user_id: favorite.user_id.to_string(),
            profile_id: favorite.profile_id.to_string(),
            created_at: favorite.created_at,
        }
    }
}

/// A favorite with the profile card it points at.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntryResponse {
    #[serde(flatten)]
    pub favorite: FavoriteResponse,
    pub profile: ProfileSummaryResponse,
}

impl From<FavoriteEntry> for FavoriteEntryResponse {
    fn from(entry: FavoriteEntry) -> Self {
        Self {
            favorite: entry.favorite.into(),
            profile: entry.profile.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FavoriteEnvelope {
    pub favorite: FavoriteResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FavoriteListResponse {
    pub favorites: Vec<FavoriteEntryResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RemovedResponse {
    pub success: bool,
}

/// Favorite a performer profile. Clients only.
#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Favorited", body = FavoriteEnvelope),
        (status = 400, description = "Missing id or already favorited", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error),
        (status = 404, description = "Profile not found", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite"
)]
#[post("/favorites")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let profile_id = payload.into_inner().profile_id()?;
    let favorite = state.favorites.add(&actor, &profile_id).await?;
    Ok(HttpResponse::Created().json(FavoriteEnvelope {
        favorite: favorite.into(),
    }))
}

/// Drop a favorite. Clients only.
#[utoipa::path(
    delete,
    path = "/api/v1/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Removed", body = RemovedResponse),
        (status = 400, description = "Missing id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error),
        (status = 404, description = "Not favorited", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite"
)]
#[delete("/favorites")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FavoriteRequest>,
) -> ApiResult<web::Json<RemovedResponse>> {
    let actor = session.require_actor()?;
    let profile_id = payload.into_inner().profile_id()?;
    state.favorites.remove(&actor, &profile_id).await?;
    Ok(web::Json(RemovedResponse { success: true }))
}

/// The caller's favorites, newest first. Clients only.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Favorites", body = FavoriteListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FavoriteListResponse>> {
    let actor = session.require_actor()?;
    let entries = state.favorites.list(&actor).await?;
    Ok(web::Json(FavoriteListResponse {
        favorites: entries.into_iter().map(FavoriteEntryResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, Role, UserId};
    use crate::inbound::http::test_utils::{
        MockPorts, session_cookie_for, test_session_middleware, test_sign_in_route,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn send(
        ports: MockPorts,
        actor: Actor,
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .wrap(test_session_middleware())
                .configure(test_sign_in_route)
                .service(
                    web::scope("/api/v1")
                        .service(add_favorite)
                        .service(remove_favorite)
                        .service(list_favorites),
                ),
        )
        .await;
        let cookie = session_cookie_for(&app, &actor).await;
        test::call_service(&app, request.cookie(cookie).to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn add_returns_created_favorite() {
        let profile_id = Uuid::new_v4();
        let mut ports = MockPorts::default();
        ports
            .favorites
            .expect_add()
            .withf(move |_, id| *id == profile_id)
            .return_once(|actor, id| {
                Ok(Favorite {
                    id: Uuid::new_v4(),
                    user_id: actor.id,
                    profile_id: *id,
                    created_at: Utc::now(),
                })
            });

        let response = send(
            ports,
            Actor::new(UserId::random(), Role::Client),
            test::TestRequest::post()
                .uri("/api/v1/favorites")
                .set_json(json!({"profileId": profile_id})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["favorite"]["profileId"], json!(profile_id.to_string()));
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_favorite_is_a_bad_request() {
        let mut ports = MockPorts::default();
        ports
            .favorites
            .expect_add()
            .return_once(|_, _| Err(Error::invalid_request("Already favorited")));

        let response = send(
            ports,
            Actor::new(UserId::random(), Role::Client),
            test::TestRequest::post()
                .uri("/api/v1/favorites")
                .set_json(json!({"profileId": Uuid::new_v4()})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], json!("Already favorited"));
    }

    #[rstest]
    #[actix_web::test]
    async fn remove_requires_a_profile_id() {
        let response = send(
            MockPorts::default(),
            Actor::new(UserId::random(), Role::Client),
            test::TestRequest::delete()
                .uri("/api/v1/favorites")
                .set_json(json!({})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn remove_missing_favorite_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .favorites
            .expect_remove()
            .return_once(|_, _| Err(Error::not_found("Favorite not found")));

        let response = send(
            ports,
            Actor::new(UserId::random(), Role::Client),
            test::TestRequest::delete()
                .uri("/api/v1/favorites")
                .set_json(json!({"profileId": Uuid::new_v4()})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn list_forwards_role_errors() {
        let mut ports = MockPorts::default();
        ports
            .favorites
            .expect_list()
            .return_once(|_| Err(Error::forbidden("Only clients have favorites")));

        let response = send(
            ports,
            Actor::new(UserId::random(), Role::Performer),
            test::TestRequest::get().uri("/api/v1/favorites"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
