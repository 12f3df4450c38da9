//! Backend entry-point: loads configuration, runs migrations and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use encore::config::AppSettings;
use encore::domain::CheckoutSettings;
use encore::inbound::http::health::HealthState;
use encore::inbound::http::session_config::{BuildMode, session_settings_from_env};
use encore::outbound::payments::StripeSettings;
use encore::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{PaymentConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let database_url = settings.database_url()?;
    run_migrations(database_url)
        .await
        .wrap_err("database migrations failed")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to create database pool")?;

    let payments = PaymentConfig::new(
        StripeSettings::new(settings.stripe_api_base(), settings.stripe_secret_key()?),
        settings.stripe_webhook_secret()?,
        CheckoutSettings::new(settings.public_base_url(), settings.checkout_currency()),
    )
    .with_webhook_tolerance(settings.webhook_tolerance());

    let bind_addr = settings.bind_addr()?;
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
        payments,
    );
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
