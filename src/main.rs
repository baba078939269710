#![deny(
    clippy::expect_used,
    clippy::future_not_send,
    clippy::pedantic,
    clippy::as_conversions,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::multiple_crate_versions
)]

use std::io;

use clap::Parser;
use student_progress::{AppArgs, server};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = AppArgs::parse();

    let listener = TcpListener::bind(format!("127.0.0.1:{}", args.port))
        .await
        .map_err(io::Error::other)?;

    tracing::info!(port = args.port, "listening");

    let app = server(args).await?;

    axum::serve(listener, app).await
}
