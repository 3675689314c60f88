//! Domain DTO exchanged with the echo service.
//!
//! # Design
//! A single `Post` type serves both directions. The outbound draft carries no
//! `id`, so the field is skipped when absent; the echo service fills it in on
//! the way back. The mock-server crate defines its own copy of the schema and
//! integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// `userId` attached to every submission.
pub const USER_ID: u64 = 1;

/// A post as sent to, and echoed back by, the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Server-assigned; absent on drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl Post {
    /// Build an outbound post with no `id` and the fixed `USER_ID`.
    pub fn draft(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            user_id: USER_ID,
        }
    }
}
