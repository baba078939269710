#![deny(
    clippy::as_conversions,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::pedantic,
    clippy::string_slice,
    clippy::todo,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::manual_non_exhaustive,
    clippy::missing_errors_doc,
    clippy::module_inception,
    clippy::module_name_repetitions,
    clippy::needless_return,
    clippy::single_match_else,
    clippy::multiple_crate_versions
)]

use std::io;

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
};
use sqlx::SqlitePool;
use tower_sessions::{Expiry, Session, SessionManagerLayer, cookie::time::Duration};
use tower_sessions_sqlx_store::SqliteStore;

use crate::{
    mailer::Mailer,
    models::{Exam, ProgressSheet, Student, Subject},
    state::AppState,
    templates::DashboardPage,
};

pub use args::AppArgs;

mod args;
pub mod auth;
pub mod flash;
mod mailer;
pub mod models;
pub mod otp;
pub mod ranking;
mod routes;
pub mod seed;
mod state;
mod templates;

pub async fn server(args: AppArgs) -> Result<Router, io::Error> {
    let db_pool = SqlitePool::connect(&args.database_url)
        .await
        .map_err(io::Error::other)?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(io::Error::other)?;

    if args.seed {
        seed::initial_data(&db_pool).await.map_err(io::Error::other)?;
    }

    let mailer = Mailer::from_args(&args).map_err(io::Error::other)?;

    let session_store = SqliteStore::new(db_pool.clone());
    session_store.migrate().await.map_err(io::Error::other)?;
    let session_layer = SessionManagerLayer::new(session_store)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let state = AppState {
        db_pool,
        mailer,
        config: args,
    };

    let router = Router::new()
        .route("/dashboard/", get(dashboard))
        .merge(auth::auth_router())
        .merge(routes::students::router())
        .merge(routes::progress::router())
        .merge(routes::ranking::router())
        .merge(routes::admin::router())
        .layer(session_layer)
        .with_state(state);

    Ok(router)
}

async fn dashboard(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, StatusCode> {
    let total_students = Student::count(&state.db_pool)
        .await
        .map_err(internal_error)?;
    let total_exams = Exam::count(&state.db_pool).await.map_err(internal_error)?;
    let total_subjects = Subject::count(&state.db_pool)
        .await
        .map_err(internal_error)?;

    let recent_progress = ProgressSheet::recent(&state.db_pool, 5)
        .await
        .map_err(internal_error)?;

    DashboardPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        total_students,
        total_exams,
        total_subjects,
        recent_progress,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

pub(crate) fn internal_error<E: std::fmt::Display>(err: E) -> StatusCode {
    tracing::error!(error = %err, "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
