//! Driving port for dashboard aggregates.

use async_trait::async_trait;

use crate::domain::{Actor, Dashboard, EarningsReport, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Role-specific overview for the caller.
    async fn dashboard(&self, actor: &Actor) -> Result<Dashboard, Error>;

    /// Payment history and totals. Performers only.
    async fn earnings(&self, actor: &Actor) -> Result<EarningsReport, Error>;
}
