//! Error types emitted while starting the Pawmatch server.
//!
//! Request-level failures never surface here; they are answered by
//! [`crate::api::errors::ApiError`].

use std::net::SocketAddr;
use std::sync::Arc;

use pawmatch_core::SelectorError;
use pawmatch_notify::NotifierBuildError;
use thiserror::Error;

/// Errors emitted by the Pawmatch server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The bind address could not be parsed.
    #[error("invalid {field} address {value:?}: {source}")]
    InvalidBindAddress {
        field: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The match threshold lies outside `0.0..=1.0`.
    #[error(transparent)]
    InvalidThreshold(#[from] SelectorError),
    /// The notification client could not be constructed.
    #[error("failed to build notifier for {endpoint:?}: {source}")]
    BuildNotifier {
        endpoint: String,
        #[source]
        source: NotifierBuildError,
    },
    /// Binding the listener failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an IO error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
