//! Seam between the core and whatever performs the HTTP round-trip.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and hands back the raw response.
///
/// Non-2xx statuses are returned as data, not as `Err`; only a round-trip
/// that never completed is a `TransportError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
