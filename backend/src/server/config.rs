//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use zeroize::Zeroizing;

use encore::domain::CheckoutSettings;
use encore::outbound::payments::{DEFAULT_TOLERANCE, StripeSettings};
use encore::outbound::persistence::DbPool;

/// Payment processor credentials and checkout parameters.
#[derive(Clone)]
pub struct PaymentConfig {
    pub(crate) stripe: StripeSettings,
    pub(crate) webhook_secret: Zeroizing<String>,
    pub(crate) webhook_tolerance: Duration,
    pub(crate) checkout: CheckoutSettings,
}

impl PaymentConfig {
    #[must_use]
    pub fn new(
        stripe: StripeSettings,
        webhook_secret: impl Into<String>,
        checkout: CheckoutSettings,
    ) -> Self {
        Self {
            stripe,
            webhook_secret: Zeroizing::new(webhook_secret.into()),
            webhook_tolerance: DEFAULT_TOLERANCE,
            checkout,
        }
    }

    #[must_use]
    pub fn with_webhook_tolerance(mut self, tolerance: Duration) -> Self {
        self.webhook_tolerance = tolerance;
        self
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) payments: PaymentConfig,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        db_pool: DbPool,
        payments: PaymentConfig,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
            payments,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
