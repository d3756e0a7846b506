//! HTTP transport shared by the resource clients
//!
//! Every call goes through [`HttpClient::execute`], which attaches the bearer
//! token, decodes JSON on 2xx, maps anything else to [`SdkError`], and retries
//! retryable failures when `max_retries` allows it.

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("petlovers-sdk/", env!("CARGO_PKG_VERSION"));
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base: String,
    config: Arc<SdkConfig>,
}

impl HttpClient {
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        let base = config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_string(),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.execute(Method::GET, path, |request| request).await
    }

    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SdkResult<T> {
        self.execute(Method::GET, path, |request| request.query(query))
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SdkResult<T> {
        let body = serde_json::to_string(body)?;
        if self.config.log_bodies {
            debug!(%path, %body, "PUT body");
        }
        self.execute(Method::PUT, path, |request| {
            request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone())
        })
        .await
    }

    /// Send a request built by `prepare`, retrying while the failure allows it
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        prepare: impl Fn(RequestBuilder) -> RequestBuilder,
    ) -> SdkResult<T> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(header::ACCEPT, "application/json");
            if let Some(value) = self.config.authorization() {
                request = request.header(header::AUTHORIZATION, value);
            }

            debug!(%method, %url, attempt, "Sending request");
            match self.attempt(prepare(request)).await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() && attempt < self.config.max_retries => {
                    let delay = retry_delay(&error, attempt);
                    warn!(%error, %url, ?delay, "Request failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn attempt<T: DeserializeOwned>(&self, request: RequestBuilder) -> SdkResult<T> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SdkError::Timeout(self.config.timeout.as_secs())
            } else {
                SdkError::NetworkError(e)
            }
        })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response.text().await?;

        if self.config.log_bodies {
            debug!(status = status.as_u16(), body = %text, "Response");
        }

        if status.is_success() {
            return serde_json::from_str(&text).map_err(SdkError::SerializationError);
        }

        let error = match (status, retry_after) {
            (StatusCode::TOO_MANY_REQUESTS, Some(retry_after)) => {
                SdkError::RateLimited { retry_after }
            }
            _ => SdkError::from_response(status.as_u16(), &text),
        };
        debug!(status = status.as_u16(), %error, "Request returned an error status");
        Err(error)
    }
}

/// Server-requested wait for 429, otherwise exponential from `RETRY_BASE_DELAY`
fn retry_delay(error: &SdkError, attempt: u32) -> Duration {
    match error {
        SdkError::RateLimited { retry_after } => Duration::from_secs(*retry_after),
        _ => RETRY_BASE_DELAY
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(RETRY_MAX_DELAY),
    }
}
