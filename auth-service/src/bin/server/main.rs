use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::credential::service::CredentialService;
use auth_service::inbound::nats::server::NatsServerError;
use auth_service::inbound::nats::NatsServer;
use auth_service::outbound::repositories::PostgresUserDirectory;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=info".into()),
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
        nats_url = %config.nats.url,
        queue_group = %config.nats.queue_group,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl()?,
    )?);
    let user_directory = Arc::new(PostgresUserDirectory::new(pg_pool.clone()));
    let credential_service = Arc::new(CredentialService::new(user_directory, authenticator));

    let nats_client = async_nats::ConnectOptions::new()
        .name("auth-service")
        .connect(config.nats.url.as_str())
        .await?;
    tracing::info!(url = %config.nats.url, protocol = "nats", "Message bus connected");

    let server = NatsServer::new(
        nats_client.clone(),
        credential_service,
        config.nats.queue_group.clone(),
    );

    let outcome = server.serve_with_shutdown(shutdown_signal()).await;

    if let Err(e) = nats_client.flush().await {
        tracing::warn!(error = %e, "Failed to flush pending replies");
    }
    pg_pool.close().await;
    tracing::info!("Connections released");

    exit_status(outcome)
}

/// Map the server outcome to the process result so a failed server exits non-zero.
fn exit_status(outcome: Result<(), NatsServerError>) -> Result<(), anyhow::Error> {
    match outcome {
        Ok(()) => {
            tracing::info!("Server exited successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
