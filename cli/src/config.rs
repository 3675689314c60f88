//! Command-line configuration.

use clap::Parser;
use post_core::DEFAULT_BASE_URL;

/// Log filter used when `RUST_LOG` is unset; the submission events come
/// from `post_core`.
pub const DEFAULT_LOG_FILTER: &str = "post_cli=info,post_core=info";

/// Submit a post to an echo service and show what came back.
#[derive(Debug, Clone, Parser)]
#[command(name = "post-cli", version)]
pub struct Config {
    /// Base URL of the service; requests go to `<base-url>/posts`.
    #[arg(long, env = "POST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Title for a one-shot submission.
    #[arg(long)]
    pub title: Option<String>,

    /// Body for a one-shot submission.
    #[arg(long)]
    pub body: Option<String>,
}

/// How the binary drives the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Submit once and exit. A missing field is sent to validation as empty.
    OneShot { title: String, body: String },
    /// Prompt on stdin until EOF.
    Interactive,
}

impl Config {
    pub fn mode(&self) -> Mode {
        if self.title.is_none() && self.body.is_none() {
            return Mode::Interactive;
        }
        Mode::OneShot {
            title: self.title.clone().unwrap_or_default(),
            body: self.body.clone().unwrap_or_default(),
        }
    }
}
