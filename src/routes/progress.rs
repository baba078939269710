use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    auth, flash, internal_error,
    models::{Exam, ExamType, MarkSaveError, ProgressSheet, ProgressSort, Student, Subject},
    state::AppState,
    templates::{AddProgressPage, ProgressSheetPage},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/progress/", get(progress_list))
        .route("/progress/add/", get(add_progress_page).post(add_progress))
}

#[derive(Deserialize)]
struct ListParams {
    exam_type: Option<String>,
    sort_by: Option<String>,
}

async fn progress_list(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, StatusCode> {
    let exam_type = params.exam_type.as_deref().and_then(ExamType::parse);
    let sort = ProgressSort::parse(params.sort_by.as_deref());

    let sheets = ProgressSheet::listing(&state.db_pool, exam_type, sort)
        .await
        .map_err(internal_error)?;

    let exams = Exam::all(&state.db_pool).await.map_err(internal_error)?;

    ProgressSheetPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        sheets,
        exams,
        selected_exam_type: exam_type.map_or("", ExamType::as_str),
        sort_by: sort.as_str(),
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

#[derive(Debug, Deserialize)]
struct ProgressForm {
    student_id: Uuid,
    exam_id: Uuid,
    subject_id: Uuid,
    marks: i64,
}

async fn add_progress_page(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, StatusCode> {
    let students = Student::all(&state.db_pool).await.map_err(internal_error)?;
    let exams = Exam::all(&state.db_pool).await.map_err(internal_error)?;
    let subjects = Subject::all(&state.db_pool).await.map_err(internal_error)?;

    AddProgressPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        students,
        exams,
        subjects,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn add_progress(
    _auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProgressForm>,
) -> Result<Redirect, StatusCode> {
    let result = ProgressSheet::create(
        &state.db_pool,
        form.student_id,
        form.exam_id,
        form.subject_id,
        form.marks,
    )
    .await;

    match result {
        Ok(()) => {
            flash::success(&session, "Progress sheet entry added successfully!")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/progress/"))
        }
        Err(err @ (MarkSaveError::MarksOutOfRange | MarkSaveError::Duplicate)) => {
            flash::error(&session, &err.to_string())
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/progress/add/"))
        }
        Err(MarkSaveError::Db(err)) => Err(internal_error(err)),
    }
}
