//! Role-specific dashboard statistics and the performer earnings page.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::money::minor_to_major;
use crate::domain::{
    ClientDashboard, Dashboard, EarningsReport, EarningsTotals, Error, PerformerDashboard, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{BookingResponse, PaymentResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformerStatsResponse {
    /// Completed payments in major currency units.
    pub total_earnings: f64,
    pub pending_bookings: i64,
    pub total_bookings: i64,
    pub unread_messages: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatsResponse {
    pub upcoming_bookings: i64,
    pub total_bookings: i64,
    pub favorites_count: i64,
    pub unread_messages: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DashboardStatsResponse {
    Performer(PerformerStatsResponse),
    Client(ClientStatsResponse),
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[schema(example = "PERFORMER")]
    pub role: String,
    pub stats: DashboardStatsResponse,
    pub recent_bookings: Vec<BookingResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        match dashboard {
            Dashboard::Performer(PerformerDashboard {
                total_earnings,
                pending_bookings,
                total_bookings,
                unread_messages,
                recent_bookings,
            }) => Self {
                role: Role::Performer.as_str().to_owned(),
                stats: DashboardStatsResponse::Performer(PerformerStatsResponse {
                    total_earnings: minor_to_major(total_earnings),
                    pending_bookings,
                    total_bookings,
                    unread_messages,
                }),
                recent_bookings: recent_bookings.into_iter().map(BookingResponse::from).collect(),
            },
            Dashboard::Client(ClientDashboard {
                upcoming_bookings,
                total_bookings,
                favorites_count,
                unread_messages,
                recent_bookings,
            }) => Self {
                role: Role::Client.as_str().to_owned(),
                stats: DashboardStatsResponse::Client(ClientStatsResponse {
                    upcoming_bookings,
                    total_bookings,
                    favorites_count,
                    unread_messages,
                }),
                recent_bookings: recent_bookings.into_iter().map(BookingResponse::from).collect(),
            },
        }
    }
}

/// Earnings totals in major currency units.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsTotalsResponse {
    pub completed: f64,
    pub pending: f64,
    pub this_month: f64,
    /// Last seven days.
    pub this_week: f64,
}

impl From<EarningsTotals> for EarningsTotalsResponse {
    fn from(totals: EarningsTotals) -> Self {
        Self {
            completed: minor_to_major(totals.completed),
            pending: minor_to_major(totals.pending),
            this_month: minor_to_major(totals.this_month),
            this_week: minor_to_major(totals.this_week),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsResponse {
    pub payments: Vec<PaymentResponse>,
    pub totals: EarningsTotalsResponse,
}

impl From<EarningsReport> for EarningsResponse {
    fn from(report: EarningsReport) -> Self {
        Self {
            payments: report.payments.into_iter().map(PaymentResponse::from).collect(),
            totals: report.totals.into(),
        }
    }
}

/// Statistics for the caller's role with their five most recent bookings.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let actor = session.require_actor()?;
    let dashboard = state.dashboard.dashboard(&actor).await?;
    Ok(web::Json(dashboard.into()))
}

/// Payment history and totals. Performers only.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/earnings",
    responses(
        (status = 200, description = "Earnings", body = EarningsResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a performer", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "getEarnings"
)]
#[get("/dashboard/earnings")]
pub async fn get_earnings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<EarningsResponse>> {
    let actor = session.require_actor()?;
    let report = state.dashboard.earnings(&actor).await?;
    Ok(web::Json(report.into()))
}
