use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

/// First id handed out, matching the public demo service.
pub const FIRST_ID: u64 = 101;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

pub type NextId = Arc<AtomicU64>;

pub fn app() -> Router {
    let next_id: NextId = Arc::new(AtomicU64::new(FIRST_ID));
    Router::new()
        .route("/posts", post(create_post))
        .route("/status/{code}", post(respond_with_status))
        .with_state(next_id)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Echo the post back with a fresh id. Nothing is stored.
async fn create_post(
    State(next_id): State<NextId>,
    Json(input): Json<CreatePost>,
) -> (StatusCode, Json<Post>) {
    let post = Post {
        id: next_id.fetch_add(1, Ordering::Relaxed),
        title: input.title,
        body: input.body,
        user_id: input.user_id,
    };
    debug!(id = post.id, "echoing post");
    (StatusCode::CREATED, Json(post))
}

/// Answer with an arbitrary status, for exercising client failure paths.
async fn respond_with_status(Path(code): Path<u16>) -> Result<StatusCode, StatusCode> {
    StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)
}
