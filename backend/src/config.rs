//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from CLI flags, `ENCORE_*` environment variables or a
//! configuration file. Secrets have no defaults and must be supplied.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_CHECKOUT_CURRENCY: &str = "usd";

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_owned()
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.to_owned()
}

fn default_stripe_api_base() -> String {
    DEFAULT_STRIPE_API_BASE.to_owned()
}

fn default_checkout_currency() -> String {
    DEFAULT_CHECKOUT_CURRENCY.to_owned()
}

/// Failures turning loaded settings into usable values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ENCORE")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// Origin of the web front end; checkout redirects point here.
    #[ortho_config(default = default_public_base_url())]
    pub public_base_url: String,
    /// Stripe secret API key.
    pub stripe_secret_key: Option<String>,
    /// Secret used to verify Stripe webhook signatures.
    pub stripe_webhook_secret: Option<String>,
    /// Stripe API origin, overridable for local fakes.
    #[ortho_config(default = default_stripe_api_base())]
    pub stripe_api_base: String,
    /// ISO currency code for checkout sessions.
    #[ortho_config(default = default_checkout_currency())]
    pub checkout_currency: String,
    /// Maximum age of a webhook signature timestamp, in seconds.
    #[ortho_config(default = 300)]
    pub webhook_tolerance_secs: u64,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(String::as_str)
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(SettingsError::Missing { name })
}

impl AppSettings {
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_ref(), "database_url")
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
                name: "bind_addr",
                reason: err.to_string(),
            })
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn stripe_secret_key(&self) -> Result<&str, SettingsError> {
        required(self.stripe_secret_key.as_ref(), "stripe_secret_key")
    }

    pub fn stripe_webhook_secret(&self) -> Result<&str, SettingsError> {
        required(self.stripe_webhook_secret.as_ref(), "stripe_webhook_secret")
    }

    pub fn stripe_api_base(&self) -> &str {
        &self.stripe_api_base
    }

    pub fn checkout_currency(&self) -> &str {
        &self.checkout_currency
    }

    pub fn webhook_tolerance(&self) -> Duration {
        Duration::from_secs(self.webhook_tolerance_secs)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }
}
