//! `reqwest` transport with an opt-in retry policy

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use super::error::TransportError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);
/// Backoff stops doubling after this many retries
const MAX_BACKOFF_DOUBLINGS: u32 = 6;
/// Methods whose repetition cannot duplicate a server-side effect
const IDEMPOTENT: [Method; 5] =
    [Method::GET, Method::HEAD, Method::PUT, Method::DELETE, Method::OPTIONS];

/// When a request may be re-sent and how long to wait in between
///
/// Only idempotent methods are ever retried, and only after a 5xx response
/// or a connect/timeout failure. `POST` and `PATCH` always get one attempt,
/// so a create the server committed before failing is never duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt for every request
    pub const NONE: Self = Self { max_attempts: 1, base_backoff: DEFAULT_BACKOFF };

    /// Up to `max_attempts` tries (at least one) with the default backoff
    #[must_use]
    pub fn with_attempts(max_attempts: usize) -> Self {
        Self { max_attempts: max_attempts.max(1), ..Self::NONE }
    }

    /// Delay before the first retry; doubled for each further one
    #[must_use]
    pub const fn with_backoff(self, base_backoff: Duration) -> Self {
        Self { base_backoff, ..self }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Whether `method` is eligible for retries at all
    #[must_use]
    pub fn covers(method: &Method) -> bool {
        IDEMPOTENT.contains(method)
    }

    fn attempts_for(&self, method: &Method) -> usize {
        if Self::covers(method) {
            self.max_attempts
        } else {
            1
        }
    }

    fn delay_before(&self, retry: usize) -> Duration {
        let doublings =
            u32::try_from(retry.saturating_sub(1)).map_or(MAX_BACKOFF_DOUBLINGS, |n| {
                n.min(MAX_BACKOFF_DOUBLINGS)
            });
        self.base_backoff.saturating_mul(1 << doublings)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

/// Shared `reqwest` client plus the retry policy applied by [`Self::send`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with the default timeout and no retries
    ///
    /// # Errors
    /// Fails when the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    /// Start a request on the underlying client
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send a request, retrying transient failures when the policy allows
    ///
    /// Non-5xx responses are returned as-is; status handling belongs to the
    /// caller. After the last permitted attempt its outcome is returned,
    /// whatever it is.
    ///
    /// # Errors
    /// `TransportError::Http` when the request cannot be built or no
    /// response was received.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let mut pending = builder.build()?;
        let attempts = self.retry.attempts_for(pending.method());
        let mut attempt = 1;

        loop {
            // Only buffered bodies can be replayed; a streaming body gets one try.
            let replay = if attempt < attempts { pending.try_clone() } else { None };
            debug!(attempt, method = %pending.method(), url = %pending.url(), "Sending request");

            let outcome = self.client.execute(pending).await;
            let Some(next) = replay else {
                return outcome.map_err(TransportError::from);
            };

            match outcome {
                Ok(response) if !response.status().is_server_error() => return Ok(response),
                Ok(response) => {
                    debug!(attempt, status = %response.status(), "Server error; retrying");
                }
                Err(err) if err.is_connect() || err.is_timeout() => {
                    debug!(attempt, error = %err, "Transient transport failure; retrying");
                }
                Err(err) => return Err(err.into()),
            }

            tokio::time::sleep(self.retry.delay_before(attempt)).await;
            pending = next;
            attempt += 1;
        }
    }
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, retry: RetryPolicy::NONE, user_agent: None }
    }
}

impl HttpClientBuilder {
    /// Per-attempt timeout enforced by `reqwest`
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// Fails when the TLS backend cannot be initialized.
    pub fn build(self) -> Result<HttpClient, TransportError> {
        let mut builder = Client::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        Ok(HttpClient { client: builder.build()?, retry: self.retry })
    }
}
