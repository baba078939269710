use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
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
    models::{self, Student, StudentSort},
    state::AppState,
    templates::{AddStudentPage, DeleteStudentPage, EditStudentPage, StudentListPage},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students/", get(student_list))
        .route("/students/add/", get(add_student_page).post(add_student))
        .route(
            "/students/edit/{id}/",
            get(edit_student_page).post(edit_student),
        )
        .route(
            "/students/delete/{id}/",
            get(delete_student_page).post(delete_student),
        )
}

#[derive(Deserialize)]
struct ListParams {
    search: Option<String>,
    sort_by: Option<String>,
}

async fn student_list(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, StatusCode> {
    let sort = StudentSort::parse(params.sort_by.as_deref());
    let search_query = params.search.unwrap_or_default();

    let students = Student::search(&state.db_pool, &search_query, sort)
        .await
        .map_err(internal_error)?;

    StudentListPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        students,
        search_query,
        sort_by: sort.as_str(),
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

#[derive(Debug, Deserialize)]
struct StudentForm {
    full_name: String,
    email: String,
    roll_number: String,
    class_batch: String,
    date_of_birth: NaiveDate,
}

async fn add_student_page(
    auth: auth::AuthUser,
    session: Session,
) -> Result<Html<String>, StatusCode> {
    AddStudentPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn add_student(
    _auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<StudentForm>,
) -> Result<Redirect, StatusCode> {
    let result = Student::create(
        &state.db_pool,
        Uuid::new_v4(),
        None,
        &form.full_name,
        &form.email,
        &form.roll_number,
        &form.class_batch,
        form.date_of_birth,
    )
    .await;

    match result {
        Ok(()) => {
            flash::success(&session, "Student added successfully!")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/students/"))
        }
        Err(err) if models::is_unique_violation(&err) => {
            flash::error(
                &session,
                "A student with this email or roll number already exists.",
            )
            .await
            .map_err(internal_error)?;
            Ok(Redirect::to("/students/add/"))
        }
        Err(err) => Err(internal_error(err)),
    }
}

async fn edit_student_page(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<Uuid>,
) -> Result<Html<String>, StatusCode> {
    let student = Student::find(&state.db_pool, student_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    EditStudentPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        student,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn edit_student(
    _auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<Uuid>,
    Form(form): Form<StudentForm>,
) -> Result<Redirect, StatusCode> {
    let result = Student::update(
        &state.db_pool,
        student_id,
        &form.full_name,
        &form.email,
        &form.roll_number,
        &form.class_batch,
        form.date_of_birth,
    )
    .await;

    match result {
        Ok(true) => {
            flash::success(&session, "Student details updated successfully!")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/students/"))
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(err) if models::is_unique_violation(&err) => {
            flash::error(
                &session,
                "A student with this email or roll number already exists.",
            )
            .await
            .map_err(internal_error)?;
            Ok(Redirect::to(&format!("/students/edit/{student_id}/")))
        }
        Err(err) => Err(internal_error(err)),
    }
}

async fn delete_student_page(
    auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<Uuid>,
) -> Result<Html<String>, StatusCode> {
    let student = Student::find(&state.db_pool, student_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    DeleteStudentPage {
        user_name: auth.username.clone(),
        flashes: flash::take(&session).await,
        student,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn delete_student(
    _auth: auth::AuthUser,
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<Uuid>,
) -> Result<Redirect, StatusCode> {
    if !Student::delete(&state.db_pool, student_id)
        .await
        .map_err(internal_error)?
    {
        return Err(StatusCode::NOT_FOUND);
    }

    flash::success(&session, "Student deleted successfully!")
        .await
        .map_err(internal_error)?;

    Ok(Redirect::to("/students/"))
}
