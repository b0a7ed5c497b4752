//! Stateless HTTP request builder and response parser for the board API.
//!
//! # Design
//! `BoardClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody};
use crate::types::{Post, PostFields, PostId};

/// Synchronous, stateless client for the board API.
#[derive(Debug, Clone)]
pub struct BoardClient {
    base_url: String,
}

impl BoardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/boards".to_string(), None)
    }

    pub fn build_get_post(&self, id: PostId) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/boards/{id}"), None)
    }

    pub fn build_create_post(&self, input: &PostFields) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Post, "/boards".to_string(), Some(body)))
    }

    pub fn build_update_post(&self, id: PostId, input: &PostFields) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Patch, format!("/boards/{id}"), Some(body)))
    }

    pub fn build_delete_post(&self, id: PostId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/boards/{id}"), None)
    }

    /// Anything other than a JSON array yields an empty list.
    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        match check_status(response)? {
            ResponseBody::Json(value @ Value::Array(_)) => decode(value),
            _ => Ok(Vec::new()),
        }
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode_post(check_status(response)?)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode_post(check_status(response)?)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode_post(check_status(response)?)
    }

    /// The server may answer with an empty body, JSON, or plain text.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<ResponseBody, ApiError> {
        check_status(response)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

fn encode(input: &PostFields) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn decode_post(body: ResponseBody) -> Result<Post, ApiError> {
    match body {
        ResponseBody::Json(value) => decode(value),
        ResponseBody::Text(text) => Err(ApiError::Deserialization(format!("expected a post, got text: {text}"))),
        ResponseBody::Empty => Err(ApiError::Deserialization("expected a post, got an empty body".to_string())),
    }
}

/// Normalize the body, then map non-2xx statuses to `ApiError::Status`.
fn check_status(response: HttpResponse) -> Result<ResponseBody, ApiError> {
    let body = ResponseBody::parse(&response.body);
    if response.is_success() {
        return Ok(body);
    }
    Err(ApiError::Status {
        status: response.status,
        body,
    })
}
