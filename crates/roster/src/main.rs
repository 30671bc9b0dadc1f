//! Roster - RBAC and session-token service for a small user registry

use anyhow::Result;
use clap::Parser;
use http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::Config;
use roster_api::{create_router, AppState};
use roster_auth::TokenService;
use roster_core::AuthService;
use roster_store::{JsonStore, NewUser, Role, UserStore};

/// Roster - RBAC and session-token service for a small user registry
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "ROSTER_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "ROSTER_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    info!("Starting Roster v{}", env!("CARGO_PKG_VERSION"));

    // A missing signing secret is generated once and written back, so
    // restarts do not invalidate outstanding tokens
    if config.auth.secret.is_empty() {
        config.auth.secret = roster_auth::generate_secret();
        config.save(&args.config)?;
        info!("Generated a new signing secret in {}", args.config);
    }

    // Open the user store
    let store = Arc::new(JsonStore::open(&config.store.path)?);

    // Create a default admin user if no users exist
    if !store.has_users() {
        info!("Creating default admin user");
        let password_hash = roster_auth::hash_password("ChangeMe!123")?;
        store.insert(NewUser {
            name: "Administrator".to_string(),
            email: "admin@roster.local".to_string(),
            phone: None,
            role: Role::Admin,
            password_hash,
        })?;
        warn!("Default admin created (email: admin@roster.local, password: ChangeMe!123) - change this password");
    }

    // Initialize the token service and auth gateway
    let tokens = TokenService::new(
        &config.auth.secret,
        config.auth.access_ttl_minutes,
        config.auth.refresh_ttl_days,
    );
    let auth = Arc::new(AuthService::new(store, tokens));

    // Create application state and router
    let state = AppState::new(auth);
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors.allowed_origins)?);

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Build the CORS layer from the configured origins
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        Ok(layer.allow_origin(Any))
    } else {
        let origins = origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(layer.allow_origin(AllowOrigin::list(origins)))
    }
}

/// Initialize logging
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
