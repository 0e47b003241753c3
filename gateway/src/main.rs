// gateway/src/main.rs
use actix_web::{web, App, HttpServer};
use common::{setup_tracing, Config, IdentityStrategyKind};
use gateway::api;
use gateway::backend::BackendClient;
use gateway::error::json_error_handler;
use gateway::identity::{IdentityStrategy, MachineHashStrategy, SessionStrategy};
use gateway::session::SessionRegistry;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Setup tracing
    setup_tracing();

    // Load configuration
    let config = Config::from_env();

    // Save address before moving config into web::Data
    let server_addr = config.gateway_addr.clone();

    tracing::info!("Starting chat relay gateway on {}", server_addr);
    tracing::info!("Relaying to backend at {}", config.backend.base_url);

    let backend = BackendClient::new(&config.backend)
        .expect("Failed to construct backend client");

    let registry = Arc::new(SessionRegistry::new(config.session.ttl_seconds));
    let strategy: Arc<dyn IdentityStrategy> = match config.identity_strategy {
        IdentityStrategyKind::Session => Arc::new(SessionStrategy::new(
            registry.clone(),
            config.session.cookie_name.clone(),
        )),
        IdentityStrategyKind::MachineHash => Arc::new(MachineHashStrategy),
    };

    // Periodic sweep of expired sessions
    let sweep_registry = registry.clone();
    let sweep_interval = Duration::from_secs(config.session.cleanup_interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await; // first tick completes immediately
        loop {
            ticker.tick().await;
            let expired = sweep_registry.cleanup_expired();
            if expired > 0 {
                tracing::info!("Cleaned up {} expired sessions", expired);
            }
        }
    });

    let strategy_data: web::Data<dyn IdentityStrategy> = web::Data::from(strategy);
    let backend_data = web::Data::new(backend);
    let config_data = web::Data::new(config);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(strategy_data.clone())
            .app_data(backend_data.clone())
            .app_data(config_data.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(api::configure)
    })
    .bind(&server_addr)?
    .run()
    .await
}
