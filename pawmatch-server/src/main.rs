//! Entry point for the Pawmatch server.
#![forbid(unsafe_code)]

use pawmatch_server::ServerError;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "pawmatch=info,tower_http=info";

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = pawmatch_server::run().await {
        if let ServerError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("pawmatch: {err}");
        std::process::exit(1);
    }
}
