//! Direct messages between signed-in users.
//!
//! ```text
//! POST /api/v1/messages {"receiverId":"...","content":"Hello"}
//! GET  /api/v1/messages?userId=...
//! POST /api/v1/messages/read {"userId":"..."}
//! GET  /api/v1/messages/conversations
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ConversationSummary, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{MessageResponse, UserCardResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id, require};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: Option<String>,
    #[schema(example = "Are you free on Saturday?")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ThreadQuery {
    /// Conversation partner.
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub message: MessageResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadResponse {
    pub success: bool,
    /// Messages flipped to read by this call.
    pub updated: u64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub user: UserCardResponse,
    pub last_message: MessageResponse,
    pub unread_count: i64,
}

impl From<ConversationSummary> for ConversationResponse {
    fn from(summary: ConversationSummary) -> Self {
        Self {
            user: summary.partner.into(),
            last_message: summary.last_message.into(),
            unread_count: summary.unread_count,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationResponse>,
}

/// Send a message to another user.
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = MessageEnvelope),
        (status = 400, description = "Invalid message", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Receiver not found", body = Error)
    ),
    tags = ["messages"],
    operation_id = "sendMessage"
)]
#[post("/messages")]
pub async fn send_message(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SendMessageRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let SendMessageRequest {
        receiver_id,
        content,
    } = payload.into_inner();
    let receiver = require(receiver_id, FieldName::new("receiverId"))?;
    let receiver = parse_user_id(&receiver, FieldName::new("receiverId"))?;
    let content = require(content, FieldName::new("content"))?;
    let message = state.messages.send(&actor, &receiver, &content).await?;
    Ok(HttpResponse::Created().json(MessageEnvelope {
        message: message.into(),
    }))
}

/// Full thread with one partner, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/messages",
    params(ThreadQuery),
    responses(
        (status = 200, description = "Messages", body = MessageListResponse),
        (status = 400, description = "Missing userId", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["messages"],
    operation_id = "listMessages"
)]
#[get("/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ThreadQuery>,
) -> ApiResult<web::Json<MessageListResponse>> {
    let actor = session.require_actor()?;
    let partner = require(query.into_inner().user_id, FieldName::new("userId"))?;
    let partner = parse_user_id(&partner, FieldName::new("userId"))?;
    let messages = state.messages.thread(&actor, &partner).await?;
    Ok(web::Json(MessageListResponse {
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    }))
}

/// Mark every message from a partner to the caller as read.
#[utoipa::path(
    post,
    path = "/api/v1/messages/read",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Messages marked read", body = MarkReadResponse),
        (status = 400, description = "Missing userId", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["messages"],
    operation_id = "markMessagesRead"
)]
#[post("/messages/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MarkReadRequest>,
) -> ApiResult<web::Json<MarkReadResponse>> {
    let actor = session.require_actor()?;
    let partner = require(payload.into_inner().user_id, FieldName::new("userId"))?;
    let partner = parse_user_id(&partner, FieldName::new("userId"))?;
    let updated = state.messages.mark_read(&actor, &partner).await?;
    Ok(web::Json(MarkReadResponse {
        success: true,
        updated,
    }))
}

/// One entry per partner with the latest message and unread count.
#[utoipa::path(
    get,
    path = "/api/v1/messages/conversations",
    responses(
        (status = 200, description = "Conversations, most recent first", body = ConversationListResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["messages"],
    operation_id = "listConversations"
)]
#[get("/messages/conversations")]
pub async fn list_conversations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ConversationListResponse>> {
    let actor = session.require_actor()?;
    let conversations = state.messages.conversations(&actor).await?;
    Ok(web::Json(ConversationListResponse {
        conversations: conversations
            .into_iter()
            .map(ConversationResponse::from)
            .collect(),
    }))
}
