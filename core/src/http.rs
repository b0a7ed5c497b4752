//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; the
//! host executes the round-trip through a [`Transport`]. All fields use owned
//! types so values move freely between the view, the client and the host.

use serde_json::Value;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `BoardClient::build_*` methods and executed by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A response body after normalization.
///
/// Absent bodies are `Empty`, bodies that parse as JSON are `Json`, and
/// anything else is kept verbatim as `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    /// The `message` field of a JSON object body.
    ///
    /// Validation pipes commonly send `message` as an array of strings; the
    /// first entry is used in that case.
    pub fn message(&self) -> Option<&str> {
        let ResponseBody::Json(Value::Object(map)) = self else {
            return None;
        };
        match map.get("message")? {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            Value::Array(items) => items.iter().find_map(Value::as_str),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

/// Executes an `HttpRequest` and hands back the raw response.
///
/// Non-2xx statuses are data, not errors: implementations return them as an
/// `HttpResponse` and only fail with [`ApiError::Transport`] when no response
/// was received at all.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
