//! Blocking HTTP transport backed by ureq.

use board_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes core requests with a ureq agent.
///
/// 4xx/5xx responses come back as data so the core decides what a status
/// means. No timeouts are configured.
pub struct UreqTransport {
    agent: ureq::Agent,
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

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), &req.headers).call(),
            HttpMethod::Post => {
                let body = req.body.unwrap_or_default();
                with_headers(self.agent.post(&req.path), &req.headers).send(body.as_bytes())
            }
            HttpMethod::Patch => {
                let body = req.body.unwrap_or_default();
                with_headers(self.agent.patch(&req.path), &req.headers).send(body.as_bytes())
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}
