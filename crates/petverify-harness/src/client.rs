// crates/petverify-harness/src/client.rs
// ============================================================================
// Module: HTTP Client Adapter
// Description: Thin reqwest wrapper issuing requests against the base
//              endpoint.
// Purpose: Produce one uniform response record per round trip.
// Dependencies: petverify-core, reqwest, tokio, url
// ============================================================================

//! ## Overview
//! The adapter performs exactly one network round trip per attempt and
//! always yields either a [`ResponseRecord`] or a [`TransportError`]; no
//! reqwest error leaks to callers. HTTP status codes are contract
//! signals, never retried: the optional retry budget applies to transport
//! faults only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use petverify_core::HttpMethod;
use petverify_core::ResponseRecord;
use petverify_core::TransportError;
use reqwest::Client;
use reqwest::Method;
use serde_json::Value;
use tokio::time::sleep;
use url::Url;

use crate::config::HarnessConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base backoff delay between transport-error retries.
const RETRY_BASE_DELAY_MS: u64 = 50;

// ============================================================================
// SECTION: Client Adapter
// ============================================================================

/// HTTP client bound to a base endpoint with a fixed timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Parsed base endpoint.
    base: Url,
    /// Shared reqwest client with the configured timeout.
    client: Client,
    /// Configured timeout, echoed into timeout diagnostics.
    timeout: Duration,
    /// Transport-only retry budget.
    transport_retries: u32,
}

impl ApiClient {
    /// Builds a client from the resolved harness configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Other`] when the base URL does not parse
    /// or the underlying client cannot be constructed.
    pub fn new(config: &HarnessConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.base_url).map_err(|err| TransportError::Other {
            message: format!("invalid base url: {err}"),
        })?;
        let client = Client::builder().timeout(config.timeout).build().map_err(|err| {
            TransportError::Other {
                message: format!("failed to build http client: {err}"),
            }
        })?;
        Ok(Self {
            base,
            client,
            timeout: config.timeout,
            transport_retries: config.transport_retries,
        })
    }

    /// Returns the configured base endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Issues one request, retrying only on transport errors within the
    /// configured budget.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when every attempt fails at the
    /// transport level. HTTP error statuses are returned as records.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<ResponseRecord, TransportError> {
        let mut attempt = 0u32;
        loop {
            match self.attempt(method, path, payload, query).await {
                Ok(record) => return Ok(record),
                Err(_) if attempt < self.transport_retries => {
                    attempt = attempt.saturating_add(1);
                    sleep(Duration::from_millis(RETRY_BASE_DELAY_MS * u64::from(attempt))).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Performs exactly one network round trip.
    async fn attempt(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<ResponseRecord, TransportError> {
        let url = self.resolve(path)?;
        let mut request = self.client.request(wire_method(method), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        let response = request.send().await.map_err(|err| self.classify(&err))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|err| self.classify(&err))?;
        Ok(ResponseRecord::from_text(status, text))
    }

    /// Resolves a path against the base endpoint.
    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        let joined = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|err| TransportError::Other {
            message: format!("invalid request url `{joined}`: {err}"),
        })
    }

    /// Maps a reqwest error onto the transport taxonomy.
    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            TransportError::Connect {
                message: err.to_string(),
            }
        } else {
            TransportError::Other {
                message: err.to_string(),
            }
        }
    }
}

/// Converts the case method onto the wire method.
const fn wire_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
