//! The seam between the client and the network.
//!
//! # Design
//! The client never talks to a socket itself: it hands a built
//! `HttpRequest` to a [`Transport`] and classifies whatever `HttpResponse`
//! comes back. Non-2xx statuses are data, not transport errors, so an
//! implementation must return them as `Ok`. Only failures to complete the
//! round-trip (connection refused, timeouts, TLS) are `Err`, and the
//! client passes those through unchanged.
//!
//! [`UreqTransport`] is the default. Tests and hosts with their own HTTP
//! stack implement the trait directly.

use crate::http::{HttpRequest, HttpResponse};

/// Error produced by a transport when the round-trip itself fails.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Executes a single `GET` request.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with status-as-error disabled so 4xx/5xx
/// responses come back as data. Timeouts, proxies and TLS are whatever the
/// supplied agent is configured with.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Uses a caller-configured agent. It must not treat HTTP status codes
    /// as errors.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.call()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
