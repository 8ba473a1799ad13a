use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use nv_api::{create_app, telemetry, AppState};
use nv_core::repositories::InMemorySessionStore;
use nv_core::services::{SessionLifecycleConfig, VerificationFlowController};
use nv_infra::create_identity_provider;
use nv_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging)?;

    info!(environment = ?config.environment, "Starting number verification API server");

    // The private key is read once here; a bad key fails startup
    let redirect_url = config.redirect_url();
    let provider = create_identity_provider(&config.provider, redirect_url.clone())
        .context("Failed to initialize identity provider")?;

    let flow = VerificationFlowController::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(provider),
        SessionLifecycleConfig::from(&config.session),
    );
    let app_state = web::Data::new(AppState::new(flow));

    let bind_address = config.server.bind_address();
    info!(
        bind_address = %bind_address,
        redirect_url = %redirect_url,
        provider = ?config.provider.kind,
        "Server will bind"
    );

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
