//! Host-side I/O: executes the requests `gemini-core` builds.

use anyhow::{Context, Result};
use gemini_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

/// Something that can perform one blocking HTTP round-trip.
pub trait Transport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport over a ureq agent.
///
/// Non-2xx statuses come back as data, not errors, so the report can show the
/// server's error body. No timeout is configured beyond ureq's defaults.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
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
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse> {
        debug!(method = req.method.as_str(), "sending request");

        let result = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.url);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match req.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.with_context(|| format!("{} request failed", req.method.as_str()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .context("failed to read response body")?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, headers, body })
    }
}
