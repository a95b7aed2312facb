//! HTTP server exposing the Pawmatch match API.
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
mod error;

use std::sync::Arc;

use clap::Parser;
use pawmatch_core::MatchEngine;
use pawmatch_notify::{HttpMatchNotifier, HttpMatchNotifierConfig};
use tokio::net::TcpListener;

use api::create_router;
use api::handlers::AppState;
use config::{Cli, Command};

pub use config::{DEFAULT_BIND, ServeArgs, ServeConfig};
pub use error::ServerError;

/// Run the server with the current process arguments and environment.
pub async fn run() -> Result<(), ServerError> {
    let cli = Cli::try_parse().map_err(ServerError::ArgumentParsing)?;
    match cli.command {
        Command::Serve(args) => serve(args.into_config()?).await,
    }
}

/// Serve the match API until interrupted.
pub async fn serve(config: ServeConfig) -> Result<(), ServerError> {
    let notifier = HttpMatchNotifier::with_config(
        HttpMatchNotifierConfig::new(config.notify_url.clone())
            .with_timeout(config.notify_timeout),
    )
    .map_err(|source| ServerError::BuildNotifier {
        endpoint: config.notify_url.clone(),
        source,
    })?;
    let state = AppState::new(MatchEngine::new(config.selector.clone()), Arc::new(notifier));

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    tracing::info!(
        addr = %config.bind,
        threshold = config.selector.threshold(),
        notify_url = %config.notify_url,
        "listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
