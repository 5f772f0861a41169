use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{InMemoryUserRepository, UserService, handlers};
use tracing::info;

mod config;
mod openapi;

use config::Config;
use openapi::ApiDoc;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting accounts service"
    );

    let service = UserService::new(InMemoryUserRepository::new());

    let apis = handlers::router(service.clone()).merge(health_router(config.app));
    let router = create_router::<ApiDoc>(apis, &config.server)?;

    create_production_app(router, &config.server, async move {
        match service.count().await {
            Ok(count) => info!(accounts = count, "Discarding in-memory accounts"),
            Err(e) => tracing::warn!("Failed to count accounts during shutdown: {}", e),
        }
    })
    .await?;

    info!("Accounts service stopped");
    Ok(())
}
