use std::sync::Arc;

use fcr_api::config::AppConfig;
use fcr_api::model::{labels, loader, predictor::OnnxCategorizer};
use fcr_api::server::{routes, types::AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // 1. Init ONNX Runtime
    loader::init_ort()?;

    // 2. Load Config
    let config = AppConfig::from_env()?;

    // 3. Load model and label sets; any failure here is fatal, the service
    //    cannot answer a single prediction without them.
    info!(model_dir = %config.model.model_dir.display(), "loading categorization model");
    let model = OnnxCategorizer::load(&config.model.model_dir)?;
    let main_classes = labels::load_labels(&config.model.main_classes_path)?;
    let sub_classes = labels::load_labels(&config.model.sub_classes_path)?;
    info!(
        main_classes = main_classes.len(),
        sub_classes = sub_classes.len(),
        "model and classes loaded"
    );

    let state = AppState {
        model: Some(Arc::new(model)),
        main_classes,
        sub_classes,
    };

    // 4. Create Router
    let app = routes::create_router(state);

    // 5. Bind & Serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fcr_api=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
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
}
