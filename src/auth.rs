use std::ops::Deref;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use askama::Template;
use axum::{
    Form, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    flash, internal_error,
    models::{self, OtpOutcome, Student, User},
    otp,
    state::AppState,
    templates::{LoginPage, RegisterPage, VerifyOtpPage},
};

pub struct AuthUser(pub User);

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let user_id = session
            .get::<Uuid>("user_id")
            .await
            .map_err(|_| Redirect::to("/").into_response())?
            .ok_or_else(|| Redirect::to("/").into_response())?;

        let user = User::find(&state.db_pool, user_id)
            .await
            .map_err(|_| Redirect::to("/").into_response())?
            .ok_or_else(|| Redirect::to("/").into_response())?;

        Ok(Self(user))
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Result of a credential check. Accounts with an unverified student
/// profile cannot log in yet; accounts without one (staff) always can.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(Uuid),
    InvalidCredentials,
    VerificationRequired(Uuid),
}

pub async fn authenticate(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> sqlx::Result<LoginOutcome> {
    let Some(user) = User::find_by_username(db, username).await? else {
        return Ok(LoginOutcome::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
        return Ok(LoginOutcome::InvalidCredentials);
    }

    if let Some(student) = Student::find_by_user(db, user.id).await? {
        if !student.is_verified {
            return Ok(LoginOutcome::VerificationRequired(user.id));
        }
    }

    Ok(LoginOutcome::Success(user.id))
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password1: String,
    pub password2: String,

    pub full_name: String,
    pub email: String,
    pub roll_number: String,
    pub class_batch: String,
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("The two password fields do not match.")]
    PasswordMismatch,
    #[error("An account with this username, email or roll number already exists.")]
    Duplicate,
    #[error("could not hash password")]
    Hash,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Creates the account and the linked unverified student profile in one
/// transaction.
pub async fn register_student(db: &SqlitePool, form: &RegisterForm) -> Result<Uuid, RegistrationError> {
    if form.password1 != form.password2 {
        return Err(RegistrationError::PasswordMismatch);
    }

    let password_hash = hash_password(&form.password1).map_err(|_| RegistrationError::Hash)?;

    let mut tx = db.begin().await?;

    let user_id = Uuid::new_v4();
    User::create(&mut *tx, user_id, &form.username, &password_hash, &form.email)
        .await
        .map_err(map_duplicate)?;

    Student::create(
        &mut *tx,
        Uuid::new_v4(),
        Some(user_id),
        &form.full_name,
        &form.email,
        &form.roll_number,
        &form.class_batch,
        form.date_of_birth,
    )
    .await
    .map_err(map_duplicate)?;

    tx.commit().await?;

    Ok(user_id)
}

fn map_duplicate(err: sqlx::Error) -> RegistrationError {
    if models::is_unique_violation(&err) {
        RegistrationError::Duplicate
    } else {
        RegistrationError::Db(err)
    }
}

/// Stores a fresh code and mails it. Returns whether delivery worked; the
/// stored code survives a failed send so a resend can still succeed.
async fn issue_and_send_otp(state: &AppState, student: &Student) -> sqlx::Result<bool> {
    let code = otp::generate();
    Student::set_otp(&state.db_pool, student.id, &code).await?;

    match state.mailer.send_otp(&student.email, &code).await {
        Ok(()) => Ok(true),
        Err(err) => {
            tracing::error!(error = %err, student_id = %student.id, "failed to send otp mail");
            Ok(false)
        }
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login_page(session: Session) -> Result<Html<String>, StatusCode> {
    LoginPage {
        flashes: flash::take(&session).await,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, StatusCode> {
    match authenticate(&state.db_pool, &form.username, &form.password)
        .await
        .map_err(internal_error)?
    {
        LoginOutcome::Success(user_id) => {
            session
                .insert("user_id", user_id)
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/dashboard/"))
        }
        LoginOutcome::VerificationRequired(_) => {
            flash::error(&session, "Please verify your email before logging in.")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/"))
        }
        LoginOutcome::InvalidCredentials => {
            flash::error(&session, "Invalid username or password.")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/"))
        }
    }
}

async fn register_page(session: Session) -> Result<Html<String>, StatusCode> {
    RegisterPage {
        flashes: flash::take(&session).await,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn register_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, StatusCode> {
    let user_id = match register_student(&state.db_pool, &form).await {
        Ok(user_id) => user_id,
        Err(err @ (RegistrationError::PasswordMismatch | RegistrationError::Duplicate)) => {
            flash::error(&session, &err.to_string())
                .await
                .map_err(internal_error)?;
            return Ok(Redirect::to("/register/"));
        }
        Err(err) => return Err(internal_error(err)),
    };

    let student = Student::find_by_user(&state.db_pool, user_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    if issue_and_send_otp(&state, &student)
        .await
        .map_err(internal_error)?
    {
        flash::success(
            &session,
            "Registration successful! Please check your email for OTP verification.",
        )
        .await
        .map_err(internal_error)?;
    } else {
        flash::error(&session, "Could not send OTP to your email.")
            .await
            .map_err(internal_error)?;
    }

    Ok(Redirect::to(&format!("/verify-otp/{user_id}/")))
}

#[derive(Deserialize)]
struct OtpForm {
    otp: String,
}

async fn verify_otp_page(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> Result<Html<String>, StatusCode> {
    Student::find_by_user(&state.db_pool, user_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    VerifyOtpPage {
        flashes: flash::take(&session).await,
        user_id,
    }
    .render()
    .map(Html)
    .map_err(internal_error)
}

async fn verify_otp_submit(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
    Form(form): Form<OtpForm>,
) -> Result<Redirect, StatusCode> {
    let student = Student::find_by_user(&state.db_pool, user_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    if !otp::is_well_formed(&form.otp) {
        flash::error(&session, "Enter the 6-digit code from your email.")
            .await
            .map_err(internal_error)?;
        return Ok(Redirect::to(&format!("/verify-otp/{user_id}/")));
    }

    match Student::verify_otp(&state.db_pool, student.id, &form.otp)
        .await
        .map_err(internal_error)?
    {
        OtpOutcome::Verified => {
            flash::success(&session, "Email verified successfully! You can now login.")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to("/"))
        }
        OtpOutcome::Mismatch => {
            flash::error(&session, "Invalid OTP. Please try again.")
                .await
                .map_err(internal_error)?;
            Ok(Redirect::to(&format!("/verify-otp/{user_id}/")))
        }
    }
}

async fn resend_otp(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> Result<Redirect, StatusCode> {
    let student = Student::find_by_user(&state.db_pool, user_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    if issue_and_send_otp(&state, &student)
        .await
        .map_err(internal_error)?
    {
        flash::success(&session, "New OTP sent to your email. Please check your inbox.")
            .await
            .map_err(internal_error)?;
    } else {
        flash::error(&session, "Failed to send OTP. Please try again later.")
            .await
            .map_err(internal_error)?;
    }

    Ok(Redirect::to(&format!("/verify-otp/{user_id}/")))
}

async fn logout(session: Session) -> Result<Redirect, StatusCode> {
    session.flush().await.map_err(internal_error)?;

    flash::success(&session, "You have been logged out successfully.")
        .await
        .map_err(internal_error)?;

    Ok(Redirect::to("/"))
}

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page).post(login_submit))
        .route("/register/", get(register_page).post(register_submit))
        .route(
            "/verify-otp/{user_id}/",
            get(verify_otp_page).post(verify_otp_submit),
        )
        .route("/resend-otp/{user_id}/", get(resend_otp))
        .route("/logout/", get(logout))
}
