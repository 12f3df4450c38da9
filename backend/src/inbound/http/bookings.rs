//! Booking requests and their status lifecycle.
//!
//! ```text
//! POST  /api/v1/bookings {"performerId":"...","type":"Portrait","date":"2024-06-01T18:00:00Z","duration":90,"rate":100}
//! GET   /api/v1/bookings
//! PATCH /api/v1/bookings/{id} {"status":"confirmed"}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::money::minor_to_major;
use crate::domain::{Booking, BookingDraft, BookingStatus, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::BookingResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_amount, parse_timestamp, parse_user_id, parse_uuid,
    require,
};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub performer_id: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "Portrait session")]
    pub kind: Option<String>,
    /// RFC 3339 timestamp.
    #[schema(example = "2024-06-01T18:00:00Z")]
    pub date: Option<String>,
    /// Minutes.
    #[schema(example = 90)]
    pub duration: Option<i32>,
    /// Hourly rate in major currency units.
    #[schema(example = 100.0)]
    pub rate: Option<f64>,
    pub notes: Option<String>,
    pub location: Option<String>,
}

impl CreateBookingRequest {
    fn into_draft(self) -> Result<BookingDraft, Error> {
        let performer_id = require(self.performer_id, FieldName::new("performerId"))?;
        let kind = require(self.kind, FieldName::new("type"))?;
        let date = require(self.date, FieldName::new("date"))?;
        let duration = self
            .duration
            .ok_or_else(|| missing_field_error(FieldName::new("duration")))?;
        let rate = self
            .rate
            .ok_or_else(|| missing_field_error(FieldName::new("rate")))?;
        Ok(BookingDraft {
            performer_id: parse_user_id(&performer_id, FieldName::new("performerId"))?,
            kind,
            date: parse_timestamp(&date, FieldName::new("date"))?,
            duration,
            rate: parse_amount(rate, FieldName::new("rate"))?,
            notes: self.notes,
            location: self.location,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateBookingRequest {
    #[schema(example = "confirmed")]
    pub status: Option<String>,
}

/// Booking row without the joined participants.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecordResponse {
    pub id: String,
    pub performer_id: String,
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: DateTime<Utc>,
    pub duration: i32,
    pub rate: f64,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingRecordResponse {
    fn from(booking: Booking) -> Self {
        let total_amount = minor_to_major(booking.total_amount());
        Self {
            id: booking.id.to_string(),
            performer_id: booking.performer_id.to_string(),
            client_id: booking.client_id.to_string(),
            kind: booking.kind,
            date: booking.date,
            duration: booking.duration,
            rate: minor_to_major(booking.rate),
            total_amount,
            notes: booking.notes,
            location: booking.location,
            status: booking.status.as_str().to_owned(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BookingEnvelope {
    pub booking: BookingResponse,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BookingRecordEnvelope {
    pub booking: BookingRecordResponse,
}

fn parse_status(raw: Option<String>) -> Result<BookingStatus, Error> {
    let raw = require(raw, FieldName::new("status"))?;
    raw.trim().parse::<BookingStatus>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "status", "code": "invalid_status" }))
    })
}

/// Request a booking with a performer. Clients only.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingEnvelope),
        (status = 400, description = "Invalid booking", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a client", body = Error),
        (status = 404, description = "Performer not found", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let draft = payload.into_inner().into_draft()?;
    let details = state.bookings.create(&actor, draft).await?;
    Ok(HttpResponse::Created().json(BookingEnvelope {
        booking: details.into(),
    }))
}

/// Bookings the caller takes part in, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "Bookings", body = BookingListResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<BookingListResponse>> {
    let actor = session.require_actor()?;
    let bookings = state.bookings.list(&actor).await?;
    Ok(web::Json(BookingListResponse {
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    }))
}

/// Move a booking through its lifecycle.
///
/// Only the performer confirms or completes; either participant may cancel.
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated booking", body = BookingRecordEnvelope),
        (status = 400, description = "Invalid status", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not allowed to set this status", body = Error),
        (status = 404, description = "Booking not found", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "updateBookingStatus"
)]
#[patch("/bookings/{id}")]
pub async fn update_booking_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateBookingRequest>,
) -> ApiResult<web::Json<BookingRecordEnvelope>> {
    let actor = session.require_actor()?;
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let status = parse_status(payload.into_inner().status)?;
    let booking = state.bookings.update_status(&actor, &id, status).await?;
    Ok(web::Json(BookingRecordEnvelope {
        booking: booking.into(),
    }))
}
