use anyhow::{Context, Result};
use roster_db::{create_pool, run_migrations, UserRepo};
use roster_server::auth::hash_password;
use roster_server::config::{load_config, FALLBACK_JWT_SECRET};
use roster_server::state::AppState;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting roster server");

    // Load configuration
    let config_path =
        std::env::var("ROSTER_CONFIG").unwrap_or_else(|_| "server-config.yaml".to_string());

    tracing::info!("Loading config from: {}", config_path);
    let config = load_config(&config_path)?;

    if config.auth.jwt_secret == FALLBACK_JWT_SECRET {
        tracing::warn!("auth.jwt_secret not set; using the built-in development fallback");
    }

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.db.url)
        .await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    // Seed initial user if configured
    if let Some(initial_user) = &config.auth.initial_user {
        match UserRepo::get_by_email(&pool, &initial_user.email).await {
            Ok(Some(_)) => {
                tracing::info!(
                    "Initial user '{}' already exists, skipping seed",
                    initial_user.email
                );
            }
            Ok(None) => {
                let password_hash = hash_password(&initial_user.password)
                    .context("Failed to hash initial user password")?;
                UserRepo::create(
                    &pool,
                    Uuid::new_v4(),
                    &initial_user.name,
                    &initial_user.email,
                    &password_hash,
                )
                .await
                .context("Failed to create initial user")?;
                tracing::info!("Created initial user: {}", initial_user.email);
            }
            Err(e) => {
                tracing::warn!("Failed to check for initial user: {}", e);
            }
        }
    }

    // Build application state and router
    let listen = config.listen.clone();
    let state = AppState::new(pool, config);
    let app = roster_server::web::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    tracing::info!("Server listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
