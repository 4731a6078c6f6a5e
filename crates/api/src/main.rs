use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certgen_ai::extraction::{ExtractionGateway, ExtractionSettings};
use certgen_ai::image::ImageGateway;
use certgen_ai::openai::OpenAiClient;
use certgen_api::config::ServerConfig;
use certgen_api::records::{PgRecordStore, RecordAccessGateway};
use certgen_api::router::build_app_router;
use certgen_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "certgen_api=debug,certgen_ai=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        upstream_timeout_secs = config.upstream_timeout_secs,
        chat_model = %config.openai.chat_model,
        image_model = %config.openai.image_model,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = certgen_db::create_pool(&config.database_url, config.upstream_timeout())
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    certgen_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    certgen_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Providers ---
    let openai = Arc::new(
        OpenAiClient::new(config.openai.clone()).expect("Failed to build provider HTTP client"),
    );

    let identity = config
        .identity
        .build(config.upstream_timeout())
        .expect("Failed to build identity client");

    // --- Gateways ---
    let extraction = ExtractionGateway::new(
        openai.clone(),
        ExtractionSettings {
            keep_model_opening_phrase: config.keep_model_opening_phrase,
            deadline: config.upstream_timeout(),
        },
    );
    let images = ImageGateway::new(openai, config.upstream_timeout());
    let records = RecordAccessGateway::new(
        identity,
        Arc::new(PgRecordStore::new(pool.clone())),
        config.upstream_timeout(),
    );

    // --- App state ---
    let state = AppState {
        extraction: Arc::new(extraction),
        images: Arc::new(images),
        records: Arc::new(records),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
