//! Layered configuration for the `serve` subcommand.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pawmatch_core::{Caregiver, DEFAULT_MATCH_THRESHOLD, MatchSelector};
use pawmatch_notify::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};

use crate::ServerError;

pub(crate) const ARG_BIND: &str = "bind";
pub(crate) const ARG_NOTIFY_URL: &str = "notify-url";
pub(crate) const ARG_NOTIFY_TIMEOUT_SECS: &str = "notify-timeout-secs";
pub(crate) const ARG_MATCH_THRESHOLD: &str = "match-threshold";
pub(crate) const ARG_CAREGIVER_NAME: &str = "caregiver-name";
pub(crate) const ARG_CAREGIVER_ADDRESS: &str = "caregiver-address";
pub(crate) const ENV_NOTIFY_URL: &str = "PAWMATCH_CMDS_SERVE_NOTIFY_URL";

/// Address the server listens on unless configured otherwise.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Parser)]
#[command(
    name = "pawmatch",
    about = "Match lost and found pet reports",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Serve the match API over HTTP.
    Serve(ServeArgs),
}

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Serve the match API. Options can come from CLI flags, \
                 configuration files, or PAWMATCH_CMDS_SERVE_* environment \
                 variables.",
    about = "Serve the match API over HTTP"
)]
#[ortho_config(prefix = "PAWMATCH")]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long = ARG_BIND, value_name = "addr")]
    #[serde(default)]
    pub bind: Option<String>,
    /// Webhook receiving match notifications.
    #[arg(long = ARG_NOTIFY_URL, value_name = "url")]
    #[serde(default)]
    pub notify_url: Option<String>,
    /// Upper bound on each notification request, in seconds.
    #[arg(long = ARG_NOTIFY_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub notify_timeout_secs: Option<u64>,
    /// Lowest confidence reported as a match, between 0 and 1.
    #[arg(long = ARG_MATCH_THRESHOLD, value_name = "confidence")]
    #[serde(default)]
    pub match_threshold: Option<f64>,
    /// Caregiver name attached to every match.
    #[arg(long = ARG_CAREGIVER_NAME, value_name = "name")]
    #[serde(default)]
    pub caregiver_name: Option<String>,
    /// Caregiver address attached to every match.
    #[arg(long = ARG_CAREGIVER_ADDRESS, value_name = "address")]
    #[serde(default)]
    pub caregiver_address: Option<String>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, ServerError> {
        let merged = self.load_and_merge().map_err(ServerError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeConfig {
    /// Listener address.
    pub bind: SocketAddr,
    /// Notification webhook.
    pub notify_url: String,
    /// Notification request timeout.
    pub notify_timeout: Duration,
    /// Threshold and caregiver applied to every match.
    pub selector: MatchSelector,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = ServerError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let notify_url = args.notify_url.ok_or(ServerError::MissingArgument {
            field: ARG_NOTIFY_URL,
            env: ENV_NOTIFY_URL,
        })?;

        let bind_value = args.bind.unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind = bind_value
            .parse()
            .map_err(|source| ServerError::InvalidBindAddress {
                field: ARG_BIND,
                value: bind_value.clone(),
                source,
            })?;

        let notify_timeout = args
            .notify_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let defaults = Caregiver::default();
        let caregiver = Caregiver::new(
            args.caregiver_name.unwrap_or(defaults.name),
            args.caregiver_address.unwrap_or(defaults.address),
        );
        let threshold = args.match_threshold.unwrap_or(DEFAULT_MATCH_THRESHOLD);
        let selector = MatchSelector::new(threshold, caregiver)?;

        Ok(Self {
            bind,
            notify_url,
            notify_timeout,
            selector,
        })
    }
}
