// ============================================================================
// Upstream Client
// ============================================================================
//
// HTTP client for communicating with the collaborator services.
// Handles:
// - Outbound URL construction (correlation id + query parameters)
// - Expected-status enforcement
// - Failure classification (transport / status / decode)
// - Per-call deadline via the configured client timeout
//
// ============================================================================

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// A classified failure from one outbound call. Callers pick different
/// handling per variant: the pipeline treats a moderation 400 as a
/// rejection, everything here is a service fault.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The service could not be reached, or the call hit its deadline.
    #[error("{service} service unreachable: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a status the caller did not expect.
    #[error("{service} service returned unexpected status {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    /// The service answered with a body the gateway could not decode.
    /// Never coerced into an empty payload.
    #[error("{service} service returned a malformed body: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    fn transport(service: &'static str, source: reqwest::Error) -> Self {
        UpstreamError::Transport { service, source }
    }

    fn decode(service: &'static str, source: reqwest::Error) -> Self {
        UpstreamError::Decode { service, source }
    }
}

/// One outbound call, immutable once built. The correlation id always
/// travels as the `request_id` query parameter, matching what the
/// collaborator services log.
#[derive(Debug)]
pub struct UpstreamRequest {
    service: &'static str,
    url: String,
    query: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    pub fn new(service: &'static str, base_url: &str, path: &str, request_id: &str) -> Self {
        Self {
            service,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
            query: vec![("request_id", request_id.to_string())],
        }
    }

    /// Append a query parameter to the outbound URL.
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }
}

/// HTTP client shared by every collaborator wrapper. One pooled
/// `reqwest::Client` with keep-alive and an explicit timeout, so a hung
/// upstream can never stall an inbound request indefinitely.
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { client })
    }

    /// GET and decode a JSON payload, enforcing the expected status.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        request: UpstreamRequest,
        expected: StatusCode,
    ) -> Result<T, UpstreamError> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(request.service, e))?;

        let status = response.status();
        if status != expected {
            warn!(
                service = request.service,
                url = %request.url,
                status = %status.as_u16(),
                expected = %expected.as_u16(),
                "Upstream returned unexpected status"
            );
            return Err(UpstreamError::Status {
                service: request.service,
                status,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::decode(request.service, e))
    }

    /// POST a JSON body and return whatever status the service answered
    /// with. Only transport failures error here; the caller interprets the
    /// status (the moderation wrapper needs the rejection status intact).
    pub async fn post_status<B: Serialize + ?Sized>(
        &self,
        request: UpstreamRequest,
        body: &B,
    ) -> Result<StatusCode, UpstreamError> {
        let response = self
            .client
            .post(&request.url)
            .query(&request.query)
            .json(body)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(request.service, e))?;

        Ok(response.status())
    }

    /// POST a JSON body and enforce the expected status, discarding the
    /// response body.
    pub async fn post_expect<B: Serialize + ?Sized>(
        &self,
        request: UpstreamRequest,
        body: &B,
        expected: StatusCode,
    ) -> Result<(), UpstreamError> {
        let service = request.service;
        let url = request.url.clone();
        let status = self.post_status(request, body).await?;
        if status != expected {
            warn!(
                service,
                url = %url,
                status = %status.as_u16(),
                expected = %expected.as_u16(),
                "Upstream returned unexpected status"
            );
            return Err(UpstreamError::Status { service, status });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_the_correlation_id_first() {
        let request = UpstreamRequest::new("news", "http://localhost:8082/", "/news", "42")
            .query("page", "2")
            .query("s", "rust");

        assert_eq!(request.url, "http://localhost:8082/news");
        assert_eq!(request.query[0], ("request_id", "42".to_string()));
        assert_eq!(request.query[1], ("page", "2".to_string()));
        assert_eq!(request.query[2], ("s", "rust".to_string()));
    }
}
