//! In-memory notifier for tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use pawmatch_core::MatchResult;

use crate::{MatchNotifier, NotifyError, NotifyReceipt};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Records every match it is asked to deliver.
///
/// Clones share the same record, so a test can keep one handle while the
/// server owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    calls: Arc<Mutex<Vec<MatchResult>>>,
    failure: Option<NotifyError>,
}

impl RecordingNotifier {
    /// A notifier that records the match and then fails with `error`.
    #[must_use]
    pub fn failing(error: NotifyError) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(error),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MatchResult>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Matches received so far, in delivery order.
    #[must_use]
    pub fn recorded(&self) -> Vec<MatchResult> {
        self.lock().clone()
    }

    /// Wait until at least `count` matches were received or `limit` elapses.
    ///
    /// Returns whether the count was reached.
    pub async fn wait_for(&self, count: usize, limit: Duration) -> bool {
        tokio::time::timeout(limit, async {
            while self.lock().len() < count {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await
        .is_ok()
    }
}

#[async_trait]
impl MatchNotifier for RecordingNotifier {
    async fn notify(&self, found: &MatchResult) -> Result<NotifyReceipt, NotifyError> {
        self.lock().push(found.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(NotifyReceipt {
                status: 200,
                body: String::new(),
            }),
        }
    }
}
