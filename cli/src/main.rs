use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use post_cli::{config, session, Config, Mode, ReqwestTransport};
use post_core::{PostClient, PostForm};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();
    info!(base_url = %config.base_url, "starting");

    let mut form = PostForm::new(PostClient::new(&config.base_url));
    let transport = ReqwestTransport::default();
    let mut stdout = tokio::io::stdout();

    match config.mode() {
        Mode::OneShot { title, body } => {
            let ok = session::run_once(&mut form, &transport, &title, &body, &mut stdout).await?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Mode::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            session::run_interactive(&mut form, &transport, stdin, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
