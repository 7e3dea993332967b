use std::sync::Arc;

use catalog_service::config::Config;
use catalog_service::domain::token::service::TokenService;
use catalog_service::domain::user::service::UserService;
use catalog_service::inbound::http::handlers::healthcheck::SystemInfo;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::PostgresTokenRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        environment = %config.server.environment,
        max_connections = config.database.max_connections,
        query_timeout_secs = config.database.query_timeout_secs,
        authentication_ttl_hours = config.tokens.authentication_ttl_hours,
        "Configuration loaded"
    );

    let query_timeout = config.database.query_timeout();
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(query_timeout)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone(), query_timeout));
    let token_repository = Arc::new(PostgresTokenRepository::new(pg_pool, query_timeout));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let token_service = Arc::new(TokenService::new(
        user_repository,
        token_repository,
        config.tokens.authentication_ttl()?,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        token_service,
        SystemInfo::new(config.server.environment.clone()),
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
