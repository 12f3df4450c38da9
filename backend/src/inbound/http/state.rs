//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see the driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, BookingService, ContentService, DashboardService, FavoriteService,
    MessagingService, PaymentService, ProfileService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub profiles: Arc<dyn ProfileService>,
    pub content: Arc<dyn ContentService>,
    pub bookings: Arc<dyn BookingService>,
    pub payments: Arc<dyn PaymentService>,
    pub messages: Arc<dyn MessagingService>,
    pub favorites: Arc<dyn FavoriteService>,
    pub dashboard: Arc<dyn DashboardService>,
}
