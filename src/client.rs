//! Authenticated HTTP transport shared by every sub-client.
//!
//! All traffic funnels through [`Client`]: one connection pool, one
//! retry policy, one error surface. Sub-clients only assemble paths and
//! payloads.

use std::env;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Method, Proxy, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ApiClientError;
use crate::server::ServerClient;
use crate::token::TokenClient;

/// Environment variable naming the proxy that all traffic must use.
///
/// When set (for example `socks5h://127.0.0.1:9050`), the onion origin
/// is selected and every request is routed through the named proxy.
/// When unset, the clear-web origin is used and ambient proxy
/// environment settings apply.
pub const TOR_PROXY_ENV: &str = "TOR_PROXY";

const BASE_URI: &str = "https://api.sporestack.com";
const BASE_URI_TOR: &str =
    "https://api.spore64i5sofqlfz5gq2ju4msgzojjwifls7rok2cti624zyq3fcelad.onion";
const CLIENT_USER_AGENT: &str = concat!("sporestack-rs/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_WAIT_CEILING: Duration = Duration::from_millis(900);
const RETRY_LIMIT: u32 = 3;

/// Retry tuning owned by a single [`Client`].
///
/// Every client instance carries its own policy and connection pool, so
/// parallel instantiation (for example in tests) cannot
/// cross-contaminate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed beyond the first attempt.
    pub max_retries: u32,
    /// Shortest wait inserted before a retry.
    pub wait_min: Duration,
    /// Longest wait inserted before a retry.
    pub wait_max: Duration,
}

impl Default for RetryPolicy {
    /// Mirrors the service defaults: three retries, backoff bounded
    /// between one third and the whole of the 900 ms ceiling.
    fn default() -> Self {
        Self {
            max_retries: RETRY_LIMIT,
            wait_min: RETRY_WAIT_CEILING / 3,
            wait_max: RETRY_WAIT_CEILING,
        }
    }
}

impl RetryPolicy {
    /// Returns the wait inserted after the zero-based `attempt`,
    /// doubling from `wait_min` and clamped to `wait_max`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.wait_min.saturating_mul(factor).min(self.wait_max)
    }

    /// Reports whether a response status is worth another attempt.
    ///
    /// Rate limiting and server-side failures are transient; 501 is a
    /// permanent capability signal, and everything else below 500 is a
    /// final answer.
    #[must_use]
    pub fn retryable_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS
            || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
    }
}

/// Authenticated handle to the SporeStack API.
///
/// All state is read-only after construction, so one instance is safely
/// shared across concurrent callers; the underlying connection pool is
/// reused and never exposed.
#[derive(Clone, Debug)]
pub struct Client {
    token: String,
    http: reqwest::Client,
    base_uri: String,
    retry: RetryPolicy,
}

impl Client {
    /// Builds a client around the given account token with the default
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Config`] when the [`TOR_PROXY_ENV`]
    /// address does not parse or the HTTP client cannot be initialised.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiClientError> {
        Self::with_retry_policy(token, RetryPolicy::default())
    }

    /// Builds a client with custom retry tuning.
    ///
    /// Reads [`TOR_PROXY_ENV`]; when set, the onion origin is selected
    /// and all traffic is routed through the named proxy. When unset,
    /// the clear-web origin is used and reqwest's ambient environment
    /// proxy handling applies.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Config`] when the proxy address does
    /// not parse or the HTTP client cannot be initialised.
    pub fn with_retry_policy(
        token: impl Into<String>,
        retry: RetryPolicy,
    ) -> Result<Self, ApiClientError> {
        let proxy_address = env::var(TOR_PROXY_ENV)
            .ok()
            .filter(|address| !address.is_empty());

        let mut builder = reqwest::Client::builder().timeout(HTTP_TIMEOUT);
        let base_uri = match proxy_address.as_deref() {
            Some(address) => {
                let proxy = Proxy::all(address).map_err(|err| ApiClientError::Config {
                    message: format!("invalid {TOR_PROXY_ENV} address {address}: {err}"),
                })?;
                builder = builder.proxy(proxy);
                BASE_URI_TOR
            }
            None => BASE_URI,
        };

        let http = builder.build().map_err(|err| ApiClientError::Config {
            message: format!("failed to initialise HTTP client: {err}"),
        })?;

        Ok(Self {
            token: token.into(),
            http,
            base_uri: base_uri.to_owned(),
            retry,
        })
    }

    /// Server lifecycle operations bound to this client's token.
    #[must_use]
    pub const fn servers(&self) -> ServerClient<'_> {
        ServerClient::new(self)
    }

    /// Token account operations bound to this client's token.
    #[must_use]
    pub const fn token_info(&self) -> TokenClient<'_> {
        TokenClient::new(self)
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// Forms an authenticated request against the client's origin.
    ///
    /// The path is concatenated onto the base address verbatim. Callers
    /// pre-serialize any payload; body bytes are attached unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Build`] when the method, path, and
    /// body cannot form a valid request.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Request, ApiClientError> {
        let url = format!("{}{path}", self.base_uri);
        let mut builder = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer: {}", self.token))
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(payload) = body {
            builder = builder.body(payload);
        }
        builder.build().map_err(|err| ApiClientError::Build {
            message: err.to_string(),
        })
    }

    /// Submits a request through the retrying transport and decodes the
    /// final 200 body into `T`.
    ///
    /// Network failures and retryable statuses are re-attempted with
    /// bounded backoff; any other non-200 status is returned
    /// immediately. Only an exact 200 counts as success.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Exhausted`] once the retry budget is
    /// spent, [`ApiClientError::Status`] for a final non-200 response,
    /// and [`ApiClientError::Decode`] when a 200 body does not match
    /// the expected schema.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ApiClientError> {
        let mut last_error = String::from("no response received");

        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                let wait = self.retry.backoff(attempt - 1);
                tracing::debug!(
                    attempt,
                    max_retries = self.retry.max_retries,
                    ?wait,
                    "retrying request"
                );
                tokio::time::sleep(wait).await;
            }

            let attempt_request = request.try_clone().ok_or_else(|| ApiClientError::Build {
                message: String::from("request body cannot be replayed"),
            })?;

            match self.http.execute(attempt_request).await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::OK {
                        let body =
                            response
                                .text()
                                .await
                                .map_err(|err| ApiClientError::Decode {
                                    message: err.to_string(),
                                })?;
                        return serde_json::from_str(&body).map_err(|err| {
                            ApiClientError::Decode {
                                message: err.to_string(),
                            }
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    if !RetryPolicy::retryable_status(status) {
                        return Err(ApiClientError::Status {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    last_error = body.trim().to_owned();
                }
                Err(err) => {
                    last_error = err.to_string();
                }
            }
        }

        Err(ApiClientError::Exhausted {
            attempts: self.retry.max_retries.saturating_add(1),
            last_error,
        })
    }

    /// Builds a client aimed at an arbitrary origin, bypassing proxy
    /// resolution. Test-only seam.
    #[cfg(test)]
    pub(crate) fn with_base_uri(
        token: impl Into<String>,
        base_uri: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            token: token.into(),
            http: reqwest::Client::new(),
            base_uri: base_uri.into(),
            retry,
        }
    }
}
