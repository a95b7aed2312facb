//! HTTP notifier posting matches to a webhook.
//!
//! Every match is wrapped in the envelope the messaging service expects:
//!
//! ```json
//! { "object": "special", "data": { "facebookID": "...", "confidence": 0.9 } }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use pawmatch_core::MatchResult;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use url::Url;

use crate::error::{NotifierBuildError, NotifyError};
use crate::{MatchNotifier, NotifyReceipt};

/// Default user agent for notification requests.
pub const DEFAULT_USER_AGENT: &str = "pawmatch-notify/0.1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const ENVELOPE_OBJECT: &str = "special";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    object: &'static str,
    data: &'a MatchResult,
}

/// Configuration for [`HttpMatchNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMatchNotifierConfig {
    /// Webhook receiving the notifications.
    pub endpoint: String,
    /// Upper bound on connecting and on the whole request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpMatchNotifierConfig {
    /// Create a configuration for `endpoint` with default timeout and agent.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Posts matches to a fixed webhook.
///
/// # Example
///
/// ```no_run
/// use pawmatch_notify::{HttpMatchNotifier, MatchNotifier};
/// # async fn run(found: pawmatch_core::MatchResult) -> Result<(), Box<dyn std::error::Error>> {
/// let notifier = HttpMatchNotifier::new("http://localhost:8080/notify")?;
/// let receipt = notifier.notify(&found).await?;
/// println!("delivered with status {}", receipt.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpMatchNotifier {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpMatchNotifier {
    /// Create a notifier for `endpoint` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP(S) URL or the HTTP
    /// client fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, NotifierBuildError> {
        Self::with_config(HttpMatchNotifierConfig::new(endpoint))
    }

    /// Create a notifier with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP(S) URL or the HTTP
    /// client fails to build.
    pub fn with_config(config: HttpMatchNotifierConfig) -> Result<Self, NotifierBuildError> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(NotifierBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// The webhook notifications are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Convert a reqwest error to a [`NotifyError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> NotifyError {
        if error.is_timeout() {
            return NotifyError::Timeout {
                url: self.endpoint.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        NotifyError::Network {
            url: self.endpoint.to_string(),
            message: error.to_string(),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, NotifierBuildError> {
    let url = Url::parse(endpoint).map_err(|source| NotifierBuildError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(NotifierBuildError::UnsupportedScheme {
            endpoint: endpoint.to_owned(),
        }),
    }
}

fn encode_envelope(found: &MatchResult) -> Result<Vec<u8>, NotifyError> {
    serde_json::to_vec(&Envelope {
        object: ENVELOPE_OBJECT,
        data: found,
    })
    .map_err(|err| NotifyError::Serialise {
        message: err.to_string(),
    })
}

#[async_trait]
impl MatchNotifier for HttpMatchNotifier {
    async fn notify(&self, found: &MatchResult) -> Result<NotifyReceipt, NotifyError> {
        let body = encode_envelope(found)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let status = response.status();
        // A body that cannot be read is not worth failing a delivered request.
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotifyError::HttpStatus {
                url: self.endpoint.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(NotifyReceipt {
            status: status.as_u16(),
            body: text,
        })
    }
}
