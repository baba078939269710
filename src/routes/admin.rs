//! Setup forms for the static reference data: exams and subjects.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    auth, flash, internal_error,
    models::{self, Exam, ExamType, Subject},
    state::AppState,
    templates::{AddExamPage, AddSubjectPage},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/exams/add/", get(add_exam_page).post(add_exam))
        .route("/subjects/add/", get(add_subject_page).post(add_subject))
}

#[derive(Debug, Deserialize)]
struct ExamForm {
    exam_type: ExamType,
    name: String,
    date: NaiveDate,
}

async fn add_exam_page(
    auth: auth::AuthUser,
    session: Session,
) -> Result<Html<String>, StatusCode> {
    AddExamPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        exam_types: ExamType::ALL.to_vec(),
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn add_exam(
    _auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ExamForm>,
) -> Result<Redirect, StatusCode> {
    let result = Exam::create(
        &state.db_pool,
        Uuid::new_v4(),
        form.exam_type,
        &form.name,
        form.date,
    )
    .await;

    match result {
        Ok(()) => {
            flash::success(&session, "Exam added successfully!")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/progress/"))
        }
        Err(err) if models::is_unique_violation(&err) => {
            flash::error(&session, "An exam of this type already exists.")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/exams/add/"))
        }
        Err(err) => Err(internal_error(err)),
    }
}

#[derive(Debug, Deserialize)]
struct SubjectForm {
    name: String,
}

async fn add_subject_page(
    auth: auth::AuthUser,
    session: Session,
) -> Result<Html<String>, StatusCode> {
    AddSubjectPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn add_subject(
    _auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SubjectForm>,
) -> Result<Redirect, StatusCode> {
    match Subject::create(&state.db_pool, Uuid::new_v4(), &form.name).await {
        Ok(()) => {
            flash::success(&session, "Subject added successfully!")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/progress/"))
        }
        Err(err) if models::is_unique_violation(&err) => {
            flash::error(&session, "A subject with this name already exists.")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/subjects/add/"))
        }
        Err(err) => Err(internal_error(err)),
    }
}
