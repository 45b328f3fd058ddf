use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_i18n::I18n;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors get colored reports
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        run_migrations::<migration::Migrator>(&db, config.app.name).await?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    info!(
        token_expiration_secs = config.security.token_expiration.as_secs(),
        "Security configuration loaded"
    );

    let i18n = I18n::from_config(&config.i18n)?;
    info!(
        default_locale = %i18n.default_locale().language_tag(),
        "Localization ready"
    );

    let state = AppState { config, db };

    // Health routes go through the same layers so /ready failures are localized
    let apis = api::routes(&state)
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));
    let app = create_router(apis, i18n, &state.config.server);

    let server = state.config.server.clone();
    let db = state.db;
    create_app(app, &server, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Hub API shutdown complete");
    Ok(())
}
