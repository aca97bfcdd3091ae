//! Authenticated JSON client for the StickyBoard API
//!
//! Turns an [`Endpoint`] into an HTTP request, unwraps the
//! `{success, message, data}` envelope and runs the refresh-then-retry
//! protocol on 401.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stickyboard_domain::{
    ApiConfig, AuthRefreshRequest, AuthRefreshResponse, ErrorPayload, ResponseEnvelope,
};
use tracing::{debug, instrument, warn};

use super::auth::{AuthManager, TokenRefresher};
use super::endpoint::Endpoint;
use super::errors::ApiError;
use crate::http::{HttpClient, RetryPolicy, TransportError};

const JSON: &str = "application/json";
const UNAUTHORIZED_AFTER_RETRY: &str = "Unauthorized after retry";

/// Status and body of a completed exchange
struct Received {
    status: StatusCode,
    body: Vec<u8>,
}

struct Inner {
    http: HttpClient,
    config: ApiConfig,
    auth: Arc<AuthManager>,
}

/// StickyBoard API client
///
/// Cheap to clone; clones share the transport, configuration and
/// [`AuthManager`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    /// Build a client with a transport configured from `config`
    ///
    /// # Errors
    /// `ApiError::Transport` when the HTTP client cannot be created.
    pub fn new(config: ApiConfig, auth: Arc<AuthManager>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder()
            .timeout(config.timeout())
            .retry(RetryPolicy::with_attempts(config.max_attempts));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self::with_http_client(config, auth, builder.build()?))
    }

    /// Build a client around an existing transport
    pub fn with_http_client(config: ApiConfig, auth: Arc<AuthManager>, http: HttpClient) -> Self {
        Self { inner: Arc::new(Inner { http, config, auth }) }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.inner.auth
    }

    /// Execute `endpoint` and return the envelope's `data`
    ///
    /// An envelope with `success: true` and no `data` decodes `T` from JSON
    /// `null`: `()`, `Option<_>` and `IgnoredAny` succeed, anything else is
    /// a decoding error.
    ///
    /// # Errors
    /// Any [`ApiError`] variant.
    #[instrument(skip_all, fields(method = %endpoint.method(), path = %endpoint.path()))]
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let received = self.execute(endpoint).await?;
        let result = if received.status.is_success() {
            decode_envelope(&received)
        } else {
            Err(map_failure(&received))
        };
        log_outcome(&result);
        result
    }

    /// Execute `endpoint` and decode the body directly as `T`
    ///
    /// 204/205 and empty bodies decode `T` from JSON `null`.
    ///
    /// # Errors
    /// Any [`ApiError`] variant except `Server`, which only the envelope
    /// produces.
    #[instrument(skip_all, fields(method = %endpoint.method(), path = %endpoint.path()))]
    pub async fn request_raw<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<T, ApiError> {
        let received = self.execute(endpoint).await?;
        let result = if received.status.is_success() {
            decode_raw(&received)
        } else {
            Err(map_failure(&received))
        };
        log_outcome(&result);
        result
    }

    /// Run the refresh protocol through this client
    ///
    /// # Errors
    /// The refresh call's error; tokens are cleared in that case.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        self.inner.auth.refresh_if_possible(Arc::new(self.clone())).await
    }

    async fn execute(&self, endpoint: &Endpoint) -> Result<Received, ApiError> {
        let is_refresh_call = self.is_refresh_path(endpoint.path());
        let mut retry_allowed = true;

        loop {
            let token = if endpoint.requires_auth() {
                self.inner.auth.current_access_token()
            } else {
                None
            };
            let request = self.build_request(endpoint, token.as_deref())?;
            let response = self.inner.http.send(request).await?;
            let status = response.status();
            debug!(%status, retry_allowed, "Response received");

            if status == StatusCode::UNAUTHORIZED && retry_allowed && !is_refresh_call {
                retry_allowed = false;
                // Anonymous calls carry no token; the current one stands in so
                // a refresh completed elsewhere is still detected.
                let rejected = if endpoint.requires_auth() {
                    token
                } else {
                    self.inner.auth.current_access_token()
                };
                debug!("Unauthorized; refreshing session before retrying once");
                let refresher = Arc::new(self.clone());
                self.inner.auth.refresh_after_rejection(rejected, refresher).await?;
                continue;
            }

            let body = response.bytes().await.map_err(TransportError::from)?.to_vec();
            return Ok(Received { status, body });
        }
    }

    fn build_request(
        &self,
        endpoint: &Endpoint,
        access_token: Option<&str>,
    ) -> Result<RequestBuilder, TransportError> {
        let config = &self.inner.config;
        let raw_url = join_url(&config.base_url, endpoint.path());
        let mut url = Url::parse(&raw_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{raw_url}: {e}")))?;

        let mut pairs = endpoint.query_pairs().peekable();
        if pairs.peek().is_some() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        for (name, value) in endpoint.headers() {
            headers.insert(header_name(name)?, header_value(value)?);
        }

        let mut builder = self.inner.http.request(endpoint.method().clone(), url);

        if let Some(body) = endpoint.json_body()? {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
            let bytes =
                serde_json::to_vec(body).map_err(|e| TransportError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        if endpoint.requires_auth() {
            if let Some(token) = access_token.filter(|t| !t.is_empty()) {
                let value = format!("{}{token}", config.access_header_prefix);
                let mut value = header_value(&value)?;
                value.set_sensitive(true);
                headers.insert(header_name(&config.access_header_name)?, value);
            }
        }

        Ok(builder.headers(headers))
    }

    fn is_refresh_path(&self, path: &str) -> bool {
        let refresh = self.inner.config.refresh_path.trim_matches('/');
        path.trim_matches('/').eq_ignore_ascii_case(refresh)
    }
}

#[async_trait]
impl TokenRefresher for ApiClient {
    async fn refresh(&self, refresh_token: &str) -> Result<AuthRefreshResponse, ApiError> {
        let body = AuthRefreshRequest { refresh_token: refresh_token.to_owned() };
        let endpoint =
            Endpoint::post(self.inner.config.refresh_path.clone()).with_body(&body).auth(false);
        self.request(&endpoint).await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("auth", &self.inner.auth)
            .finish_non_exhaustive()
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_matches('/'), path.trim_matches('/'))
}

fn header_name(name: &str) -> Result<HeaderName, TransportError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| TransportError::InvalidHeader(format!("{name}: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader(e.to_string()))
}

fn decode_envelope<T: DeserializeOwned>(received: &Received) -> Result<T, ApiError> {
    let envelope: ResponseEnvelope<Value> =
        serde_json::from_slice(&received.body).map_err(ApiError::decoding)?;
    if !envelope.success {
        return Err(ApiError::server_message(envelope.message));
    }
    serde_json::from_value(envelope.data.unwrap_or(Value::Null)).map_err(ApiError::decoding)
}

fn decode_raw<T: DeserializeOwned>(received: &Received) -> Result<T, ApiError> {
    let no_content = matches!(received.status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT)
        || received.body.iter().all(u8::is_ascii_whitespace);
    if no_content {
        serde_json::from_value(Value::Null).map_err(ApiError::decoding)
    } else {
        serde_json::from_slice(&received.body).map_err(ApiError::decoding)
    }
}

/// Map a non-2xx response
///
/// Bodies shaped like an error payload (an object with `code`) are decoded
/// strictly, so an unrecognized code is a decoding error.
fn map_failure(received: &Received) -> ApiError {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(&received.body) {
        if map.contains_key("code") {
            return serde_json::from_value::<ErrorPayload>(Value::Object(map))
                .map_or_else(ApiError::decoding, ApiError::from);
        }
    }

    if received.status == StatusCode::UNAUTHORIZED {
        return ApiError::AuthInvalid(Some(UNAUTHORIZED_AFTER_RETRY.to_string()));
    }

    let body = String::from_utf8_lossy(&received.body).into_owned();
    ApiError::Unknown {
        status: Some(received.status.as_u16()),
        body: (!body.is_empty()).then_some(body),
    }
}

fn log_outcome<T>(result: &Result<T, ApiError>) {
    match result {
        Ok(_) => debug!("Request succeeded"),
        Err(e) if matches!(e, ApiError::Transport(_) | ApiError::Decoding(_)) => {
            warn!(kind = %e.kind(), error = %e, "Request failed");
        }
        Err(e) => debug!(kind = %e.kind(), error = %e, "Request failed"),
    }
}
