//! Client core for submitting posts to an echo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `PostForm` layers a draft
//! and a submission state machine on top; the actual round-trip goes through
//! the `Transport` trait, which the host implements.
//!
//! # Design
//! - `PostClient` is stateless; it holds only `base_url`.
//! - Submitting is split into `begin_submit` (validate, produce request) and
//!   `complete` (apply response), so the I/O boundary stays explicit.
//!   `PostForm::submit` awaits a `Transport` in between.
//! - The `Post` DTO is defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{PostClient, DEFAULT_BASE_URL};
pub use error::{ApiError, SubmitError, TransportError, FALLBACK_MESSAGE, VALIDATION_MESSAGE};
pub use form::{InFlight, PendingSubmission, PostForm, SubmissionState};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{Post, USER_ID};
