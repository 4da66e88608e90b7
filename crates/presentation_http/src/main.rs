//! Myna HTTP Server
//!
//! Main entry point for the voice-cloning synthesis API server.

use std::{sync::Arc, time::Duration};

use application::{SynthesisConfig, SynthesisService, ports::EnginePort};
use infrastructure::{AppConfig, AudioAdapter, EngineAdapter};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so the log format can follow it
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    init_tracing(&config);

    info!("Myna v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.engine.model,
        environment = %config.environment,
        "Configuration loaded"
    );

    // Samples ship with the deployment; output accumulates at runtime
    tokio::fs::create_dir_all(&config.storage.samples_dir).await?;
    tokio::fs::create_dir_all(&config.storage.output_dir).await?;

    // Initialize adapters
    let audio = Arc::new(AudioAdapter::new(
        &config.audio.bridge,
        ai_speech::ConditioningOptions {
            apply_lowpass: config.audio.apply_lowpass,
        },
    ));
    let engine: Arc<dyn EnginePort> = Arc::new(
        EngineAdapter::new(config.engine.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize engine: {e}"))?,
    );

    // Load the model in the background; the server stays reachable so
    // health checks can report the loading state
    let warmup_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        match warmup_engine.warm_up().await {
            Ok(()) => info!("Synthesis model loaded"),
            Err(e) => warn!(error = %e, "Model warm-up failed; first synthesis will retry"),
        }
    });

    let synthesis = SynthesisService::new(
        audio,
        Arc::clone(&engine),
        SynthesisConfig {
            samples_dir: config.storage.samples_dir.clone(),
            output_dir: config.storage.output_dir.clone(),
            temp_dir: std::env::temp_dir(),
            apply_speech_rate: config.audio.apply_speech_rate,
        },
    );

    let state = AppState {
        synthesis: Arc::new(synthesis),
        engine,
        config: Arc::new(config.clone()),
    };

    // Build router with middleware (order matters: first added = outermost)
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(RequestBodyLimitLayer::new(config.server.max_upload_bytes));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Initialize tracing with a format matching the environment
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());

    let fmt_layer = if config.is_production() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
