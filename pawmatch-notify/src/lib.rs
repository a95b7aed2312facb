//! Delivery of match notifications to the messaging service.
//!
//! The [`MatchNotifier`] trait abstracts over how a [`MatchResult`] reaches
//! users. [`HttpMatchNotifier`] posts it to a webhook; the server dispatches
//! deliveries on a background task with [`dispatch`] so a slow or failing
//! service never delays the HTTP response.

#![forbid(unsafe_code)]

use std::sync::Arc;

use async_trait::async_trait;
use pawmatch_core::MatchResult;
use tokio::task::JoinHandle;

mod error;
mod http;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::{NotifierBuildError, NotifyError};
pub use http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpMatchNotifier, HttpMatchNotifierConfig};

/// What the notification service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyReceipt {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

/// Sends matches to the people who should see them.
#[async_trait]
pub trait MatchNotifier: Send + Sync {
    /// Deliver `found`.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] describing why delivery failed.
    async fn notify(&self, found: &MatchResult) -> Result<NotifyReceipt, NotifyError>;
}

/// Deliver `found` and log the outcome instead of returning it.
pub async fn notify_and_log(notifier: &dyn MatchNotifier, found: &MatchResult) {
    match notifier.notify(found).await {
        Ok(receipt) => log::info!(
            "notification delivered with status {}: {}",
            receipt.status,
            receipt.body
        ),
        Err(err) => log::warn!("notification failed: {err}"),
    }
}

/// Spawn delivery of `found` on the current Tokio runtime.
///
/// The returned handle may be dropped; the task keeps running.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
pub fn dispatch(notifier: Arc<dyn MatchNotifier>, found: MatchResult) -> JoinHandle<()> {
    tokio::spawn(async move { notify_and_log(notifier.as_ref(), &found).await })
}
