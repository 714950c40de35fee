use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use auth_service::repositories::InMemoryUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime_seconds = config.auth.token.lifetime_seconds,
        hashing_memory_kib = config.auth.hashing.memory_kib,
        hashing_iterations = config.auth.hashing.iterations,
        hashing_workers = config.auth.hashing.max_concurrent,
        login_timeout_ms = config.auth.login_timeout_ms,
        "Configuration loaded"
    );

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let authenticator = Arc::new(Authenticator::new(&config.auth, user_repository)?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(authenticator)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
