//! Draft state and the submission state machine.
//!
//! # Design
//! The outcome of the last attempt is one `SubmissionState` value rather
//! than independent loading/error/response fields, so "error and response at
//! once" cannot be represented.
//!
//! Submission is split the same way the client is: `begin_submit` validates
//! and hands out a `PendingSubmission`, the host executes its request, and
//! `complete` applies the result. `submit` chains the three for callers that
//! just want to await a `Transport`.
//!
//! Only one attempt may be outstanding. A second `begin_submit` while
//! loading is rejected with `SubmitError::InFlight`. A completion for an
//! attempt the form is no longer waiting on (after `reset`, or from an older
//! attempt) is dropped with `SubmitError::Stale`.
//!
//! `start` wraps `begin_submit` in an `InFlight` guard that borrows the
//! form until the attempt is completed. Dropping the guard first (a
//! cancelled future, an early `?`) puts the form back to `Idle`, so it can
//! never stay `Loading`.

use tracing::{debug, info, warn};

use crate::client::PostClient;
use crate::error::{SubmitError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::Post;

/// What the form is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Succeeded(Post),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&Post> {
        match self {
            SubmissionState::Succeeded(post) => Some(post),
            _ => None,
        }
    }
}

/// A started attempt: the request to execute and the ticket to complete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub attempt: u64,
    pub request: HttpRequest,
}

/// Draft title and body plus the state of the last submission.
#[derive(Debug, Clone)]
pub struct PostForm {
    client: PostClient,
    title: String,
    body: String,
    state: SubmissionState,
    attempt: u64,
}

impl PostForm {
    pub fn new(client: PostClient) -> Self {
        Self {
            client,
            title: String::new(),
            body: String::new(),
            state: SubmissionState::Idle,
            attempt: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn response(&self) -> Option<&Post> {
        self.state.response()
    }

    /// Back to `Idle`. Drafts are kept; an outstanding attempt is abandoned
    /// and its completion will be ignored.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            debug!(attempt = self.attempt, "abandoning outstanding submission");
        }
        self.state = SubmissionState::Idle;
    }

    /// Validate the draft and enter `Loading`.
    ///
    /// On `InFlight` the state is left alone. On any other error the form is
    /// already showing the failure and no request exists.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.state.is_loading() {
            return Err(SubmitError::InFlight);
        }
        if self.title.trim().is_empty() || self.body.trim().is_empty() {
            return Err(self.fail(SubmitError::Validation));
        }

        let draft = Post::draft(self.title.clone(), self.body.clone());
        let request = match self.client.build_create_post(&draft) {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.attempt += 1;
        self.state = SubmissionState::Loading;
        info!(attempt = self.attempt, path = %request.path, "submitting post");
        Ok(PendingSubmission {
            attempt: self.attempt,
            request,
        })
    }

    /// Apply the result of executing a `PendingSubmission`'s request.
    ///
    /// Success stores the echoed post and clears both drafts. Failure keeps
    /// the drafts. Either way the form leaves `Loading`.
    pub fn complete(
        &mut self,
        attempt: u64,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Post, SubmitError> {
        if !self.state.is_loading() || attempt != self.attempt {
            debug!(attempt, current = self.attempt, "ignoring stale completion");
            return Err(SubmitError::Stale);
        }

        let parsed = result
            .map_err(SubmitError::from)
            .and_then(|response| self.client.parse_create_post(response).map_err(SubmitError::from));

        match parsed {
            Ok(post) => {
                info!(attempt, id = ?post.id, "post accepted");
                self.title.clear();
                self.body.clear();
                self.state = SubmissionState::Succeeded(post.clone());
                Ok(post)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// `begin_submit` under a guard. The request is returned separately so
    /// the form stays readable through the guard while it is executed.
    pub fn start(&mut self) -> Result<(InFlight<'_>, HttpRequest), SubmitError> {
        let PendingSubmission { attempt, request } = self.begin_submit()?;
        Ok((
            InFlight {
                form: self,
                attempt,
            },
            request,
        ))
    }

    /// Begin, await `transport`, complete. Dropping the future mid-request
    /// leaves the form `Idle`.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<Post, SubmitError>
    where
        T: Transport + ?Sized,
    {
        let (in_flight, request) = self.start()?;
        let result = transport.execute(request).await;
        in_flight.complete(result)
    }

    fn fail(&mut self, err: SubmitError) -> SubmitError {
        warn!(error = %err, "submission failed");
        self.state = SubmissionState::Failed(err.to_string());
        err
    }
}

/// An outstanding attempt holding its form.
///
/// Dropped without `complete`, it abandons the attempt the way `reset` does.
#[derive(Debug)]
pub struct InFlight<'a> {
    form: &'a mut PostForm,
    attempt: u64,
}

impl InFlight<'_> {
    pub fn form(&self) -> &PostForm {
        self.form
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn complete(
        mut self,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Post, SubmitError> {
        let attempt = self.attempt;
        self.form.complete(attempt, result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.form.state.is_loading() && self.form.attempt == self.attempt {
            debug!(attempt = self.attempt, "submission dropped before completion");
            self.form.state = SubmissionState::Idle;
        }
    }
}

impl Default for PostForm {
    fn default() -> Self {
        Self::new(PostClient::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{FALLBACK_MESSAGE, VALIDATION_MESSAGE};
    use crate::transport::MockTransport;

    fn form(title: &str, body: &str) -> PostForm {
        let mut form = PostForm::new(PostClient::new("http://localhost:3000"));
        form.set_title(title);
        form.set_body(body);
        form
    }

    fn created(body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn echoed() -> Post {
        Post {
            id: Some(1),
            title: "t".to_string(),
            body: "b".to_string(),
            user_id: 1,
        }
    }

    #[test]
    fn starts_idle_with_empty_drafts() {
        let form = PostForm::default();
        assert_eq!(form.title(), "");
        assert_eq!(form.body(), "");
        assert_eq!(form.state(), &SubmissionState::Idle);
        assert!(!form.is_loading());
        assert!(form.error().is_none());
        assert!(form.response().is_none());
    }

    #[tokio::test]
    async fn blank_drafts_never_reach_the_network() {
        for (title, body) in [("", "b"), ("t", ""), ("   ", "b"), ("t", "\n\t"), ("", "")] {
            let mut transport = MockTransport::new();
            transport.expect_execute().times(0);
            let mut form = form(title, body);

            let err = form.submit(&transport).await.unwrap_err();

            assert_eq!(err, SubmitError::Validation);
            assert_eq!(form.error(), Some(VALIDATION_MESSAGE));
            assert!(!form.is_loading());
            assert_eq!(form.title(), title);
        }
    }

    #[test]
    fn validation_failure_replaces_previous_response() {
        let mut form = form("t", "b");
        let pending = form.begin_submit().unwrap();
        form.complete(pending.attempt, created(r#"{"id":1,"title":"t","body":"b","userId":1}"#))
            .unwrap();
        assert!(form.response().is_some());

        form.begin_submit().unwrap_err();
        assert!(form.response().is_none());
        assert_eq!(form.error(), Some(VALIDATION_MESSAGE));
    }

    #[test]
    fn begin_enters_loading_and_complete_leaves_it() {
        let mut form = form("t", "b");
        let pending = form.begin_submit().unwrap();
        assert!(form.is_loading());
        assert!(form.error().is_none());
        assert!(form.response().is_none());

        let _ = form.complete(pending.attempt, Err(TransportError::Opaque));
        assert!(!form.is_loading());
    }

    #[test]
    fn pending_request_carries_current_draft() {
        let mut form = form("Hello", "World");
        let pending = form.begin_submit().unwrap();
        let body: serde_json::Value =
            serde_json::from_str(pending.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "Hello", "body": "World", "userId": 1}));
    }

    #[tokio::test]
    async fn success_stores_response_and_clears_drafts() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| created(r#"{"id":1,"title":"t","body":"b","userId":1}"#));
        let mut form = form("t", "b");

        let post = form.submit(&transport).await.unwrap();

        assert_eq!(post, echoed());
        assert_eq!(form.state(), &SubmissionState::Succeeded(echoed()));
        assert_eq!(form.title(), "");
        assert_eq!(form.body(), "");
        assert!(form.error().is_none());
    }

    #[tokio::test]
    async fn http_failure_keeps_drafts() {
        let mut transport = MockTransport::new();
        transport.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: "oops".to_string(),
            })
        });
        let mut form = form("t", "b");

        form.submit(&transport).await.unwrap_err();

        assert!(form.error().unwrap().contains("500"));
        assert!(form.response().is_none());
        assert_eq!(form.title(), "t");
        assert_eq!(form.body(), "b");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn transport_message_is_shown_verbatim() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Err(TransportError::Message("Network down".to_string())));
        let mut form = form("t", "b");

        form.submit(&transport).await.unwrap_err();

        assert_eq!(form.error(), Some("Network down"));
    }

    #[tokio::test]
    async fn opaque_failure_shows_fallback() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Err(TransportError::Opaque));
        let mut form = form("t", "b");

        let err = form.submit(&transport).await.unwrap_err();

        assert_eq!(err, SubmitError::Unknown);
        assert_eq!(form.error(), Some(FALLBACK_MESSAGE));
    }

    #[tokio::test]
    async fn malformed_body_surfaces_parse_error() {
        let mut transport = MockTransport::new();
        transport.expect_execute().returning(|_| created("<html>"));
        let mut form = form("t", "b");

        let err = form.submit(&transport).await.unwrap_err();

        assert!(matches!(err, SubmitError::RequestFailed(_)));
        assert!(form.response().is_none());
        assert_eq!(form.title(), "t");
    }

    #[tokio::test]
    async fn sequential_submissions_are_independent() {
        let mut transport = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(TransportError::Message("Network down".to_string())));
        transport
            .expect_execute()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| created(r#"{"id":1,"title":"t","body":"b","userId":1}"#));
        let mut form = form("t", "b");

        form.submit(&transport).await.unwrap_err();
        form.submit(&transport).await.unwrap();
        assert!(form.error().is_none());

        form.set_title("t");
        form.set_body("b");
        form.submit(&transport).await.unwrap();
        assert_eq!(form.response(), Some(&echoed()));
        assert!(form.error().is_none());
    }

    #[test]
    fn second_begin_while_loading_is_rejected() {
        let mut form = form("t", "b");
        let first = form.begin_submit().unwrap();

        assert_eq!(form.begin_submit().unwrap_err(), SubmitError::InFlight);
        assert!(form.is_loading());

        form.complete(first.attempt, created(r#"{"id":1,"title":"t","body":"b","userId":1}"#))
            .unwrap();
        assert_eq!(form.response(), Some(&echoed()));
    }

    struct Stalled;

    #[async_trait::async_trait]
    impl Transport for Stalled {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn cancelled_submit_does_not_leave_form_loading() {
        let mut form = form("t", "b");

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(50), form.submit(&Stalled)).await;

        assert!(timed_out.is_err());
        assert!(!form.is_loading());
        assert_eq!(form.state(), &SubmissionState::Idle);
        assert_eq!(form.title(), "t");
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn dropped_guard_abandons_attempt() {
        let mut form = form("t", "b");
        let (in_flight, _request) = form.start().unwrap();
        assert!(in_flight.form().is_loading());
        let attempt = in_flight.attempt();
        drop(in_flight);

        assert_eq!(form.state(), &SubmissionState::Idle);
        assert_eq!(
            form.complete(attempt, Err(TransportError::Opaque)).unwrap_err(),
            SubmitError::Stale
        );
    }

    #[test]
    fn completed_guard_keeps_result() {
        let mut form = form("t", "b");
        let (in_flight, _request) = form.start().unwrap();
        in_flight
            .complete(created(r#"{"id":1,"title":"t","body":"b","userId":1}"#))
            .unwrap();

        assert_eq!(form.state(), &SubmissionState::Succeeded(echoed()));
    }

    #[test]
    fn completion_after_reset_is_ignored() {
        let mut form = form("t", "b");
        let pending = form.begin_submit().unwrap();
        form.reset();

        let err = form
            .complete(pending.attempt, created(r#"{"id":1,"title":"t","body":"b","userId":1}"#))
            .unwrap_err();

        assert_eq!(err, SubmitError::Stale);
        assert_eq!(form.state(), &SubmissionState::Idle);
        assert_eq!(form.title(), "t");
    }

    #[test]
    fn completion_for_older_attempt_is_ignored() {
        let mut form = form("t", "b");
        let old = form.begin_submit().unwrap();
        form.reset();
        let current = form.begin_submit().unwrap();
        assert_ne!(old.attempt, current.attempt);

        assert_eq!(
            form.complete(old.attempt, Err(TransportError::Opaque)).unwrap_err(),
            SubmitError::Stale
        );
        assert!(form.is_loading());
    }
}
