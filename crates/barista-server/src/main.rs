use clap::Parser;
use tracing_subscriber::EnvFilter;

use barista_core::BaristaConfig;
use barista_server::AppState;
use barista_server::routes;

#[derive(Parser, Debug)]
#[command(name = "barista-server", version, about = "Barista drinks API server")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "BARISTA_CONFIG", default_value = "barista.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = if std::path::Path::new(&cli.config).exists() {
        BaristaConfig::from_file(&cli.config)?
    } else {
        tracing::warn!(path = %cli.config, "config file not found, using defaults");
        BaristaConfig::default()
    };
    config.validate()?;

    let state = AppState::init(config).await?;
    let addr = state.bind_addr().to_string();
    let app = routes::create_router(state);

    tracing::info!(address = %addr, "barista-server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            // Without a signal handler the server cannot shut down cleanly,
            // but it should keep serving rather than exit at boot.
            tracing::error!(error = %err, "failed to install shutdown handler");
            std::future::pending::<()>().await;
        }
    }
}
