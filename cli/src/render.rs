//! Text rendering of the form, one panel per line group.

use std::fmt::Write;

use post_core::{PostForm, SubmissionState};

pub const HEADING: &str = "API 테스트 - POST 요청";
pub const SUBMIT_LABEL: &str = "POST 요청 보내기";
pub const LOADING_LABEL: &str = "전송 중...";
pub const TITLE_PROMPT: &str = "포스트 제목: ";
pub const BODY_PROMPT: &str = "포스트 내용: ";

/// Label of the submit trigger; it reads as disabled while loading.
pub fn button_label(form: &PostForm) -> &'static str {
    if form.is_loading() {
        LOADING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

/// Render the heading, the trigger and whichever result panel applies.
pub fn render(form: &PostForm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADING}");
    let _ = writeln!(out, "[{}]", button_label(form));

    match form.state() {
        SubmissionState::Idle | SubmissionState::Loading => {}
        SubmissionState::Failed(msg) => {
            let _ = writeln!(out, "오류: {msg}");
        }
        SubmissionState::Succeeded(post) => {
            let id = post.id.map(|id| id.to_string()).unwrap_or_default();
            let _ = writeln!(out, "응답 성공!");
            let _ = writeln!(out, "ID: {id}");
            let _ = writeln!(out, "제목: {}", post.title);
            let _ = writeln!(out, "내용: {}", post.body);
            let _ = writeln!(out, "사용자 ID: {}", post.user_id);
        }
    }
    out
}
