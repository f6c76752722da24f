use std::process::ExitCode;

use therapair::adapters::roster::JsonFileRosterSource;
use therapair::app::{build_mailer, build_router, build_widget, init_tracing};
use therapair::config::AppConfig;
use therapair::ports::RosterSource;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    // The roster ships with the widget; check it before accepting bookings.
    let roster = JsonFileRosterSource::new(&config.widget.roster_path)
        .load()
        .await?;
    let widget = build_widget(&config.widget, roster)?;
    tracing::info!(
        therapists = widget.roster().len(),
        steps = widget.catalog().len(),
        "Widget roster checked"
    );

    let mailer = build_mailer(&config)?;
    let router = build_router(&config, mailer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Therapair listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
