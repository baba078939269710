use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    auth, flash, internal_error,
    models::{Exam, ExamType, ProgressSheet},
    ranking,
    state::AppState,
    templates::RankingPage,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/ranking/", get(ranking_page))
}

#[derive(Deserialize)]
struct RankingParams {
    exam_type: Option<String>,
}

async fn ranking_page(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RankingParams>,
) -> Result<Html<String>, StatusCode> {
    let exam_type = params
        .exam_type
        .as_deref()
        .and_then(ExamType::parse)
        .unwrap_or(ExamType::Quarterly);

    let records = ProgressSheet::marks_for_exam_type(&state.db_pool, exam_type)
        .await
        .map_err(internal_error)?;

    let entries = ranking::rank(records);

    let exam_types = Exam::types_in_use(&state.db_pool)
        .await
        .map_err(internal_error)?;

    RankingPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        entries,
        selected_exam_type: exam_type,
        exam_types,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}
