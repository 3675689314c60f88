//! Stateless HTTP request builder and response parser for the posts endpoint.
//!
//! # Design
//! `PostClient` holds only a `base_url` and carries no mutable state between
//! calls. Creating a post is split into `build_create_post`, which produces
//! an `HttpRequest`, and `parse_create_post`, which consumes an
//! `HttpResponse`. The round-trip in between belongs to the caller.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Post;

/// Public demo service that echoes posted objects back with an `id`.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Synchronous, stateless client for the posts endpoint.
#[derive(Debug, Clone)]
pub struct PostClient {
    base_url: String,
}

impl PostClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn build_create_post(&self, input: &Post) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response)?;
        debug!(status = response.status, "parsing create-post response");
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

impl Default for PostClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Anything outside 2xx is a failure; the body is kept for debugging.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
