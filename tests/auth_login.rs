use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use student_progress::auth::{
    self, LoginOutcome, RegisterForm, RegistrationError, authenticate, register_student,
};
use student_progress::models::{Student, User};
use uuid::Uuid;

async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

fn register_form(username: &str, email: &str, roll: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_owned(),
        password1: "hunter22".to_owned(),
        password2: "hunter22".to_owned(),
        full_name: "Ada Lovelace".to_owned(),
        email: email.to_owned(),
        roll_number: roll.to_owned(),
        class_batch: "12-B".to_owned(),
        date_of_birth: NaiveDate::from_ymd_opt(2008, 12, 10).expect("valid date"),
    }
}

#[tokio::test]
async fn registration_creates_account_and_unverified_profile() {
    let db = pool().await;

    let user_id = register_student(&db, &register_form("ada", "ada@example.com", "R-100"))
        .await
        .expect("register");

    let user = User::find(&db, user_id).await.expect("find").expect("user");
    assert_eq!(user.username, "ada");
    assert_ne!(user.password_hash, "hunter22");

    let student = Student::find_by_user(&db, user_id)
        .await
        .expect("find")
        .expect("student");
    assert!(!student.is_verified);
    assert_eq!(student.roll_number, "R-100");
}

#[tokio::test]
async fn registration_rejects_password_mismatch() {
    let db = pool().await;

    let mut form = register_form("ada", "ada@example.com", "R-100");
    form.password2 = "different".to_owned();

    assert!(matches!(
        register_student(&db, &form).await,
        Err(RegistrationError::PasswordMismatch)
    ));
}

#[tokio::test]
async fn registration_rejects_duplicate_username() {
    let db = pool().await;

    register_student(&db, &register_form("ada", "ada@example.com", "R-100"))
        .await
        .expect("first registration");

    assert!(matches!(
        register_student(&db, &register_form("ada", "other@example.com", "R-101")).await,
        Err(RegistrationError::Duplicate)
    ));
}

#[tokio::test]
async fn unverified_student_cannot_log_in() {
    let db = pool().await;

    let user_id = register_student(&db, &register_form("ada", "ada@example.com", "R-100"))
        .await
        .expect("register");

    assert_eq!(
        authenticate(&db, "ada", "hunter22").await.expect("auth"),
        LoginOutcome::VerificationRequired(user_id)
    );
}

#[tokio::test]
async fn verified_student_logs_in() {
    let db = pool().await;

    let user_id = register_student(&db, &register_form("ada", "ada@example.com", "R-100"))
        .await
        .expect("register");

    let student = Student::find_by_user(&db, user_id)
        .await
        .expect("find")
        .expect("student");
    Student::set_otp(&db, student.id, "123456")
        .await
        .expect("set otp");
    Student::verify_otp(&db, student.id, "123456")
        .await
        .expect("verify");

    assert_eq!(
        authenticate(&db, "ada", "hunter22").await.expect("auth"),
        LoginOutcome::Success(user_id)
    );
}

#[tokio::test]
async fn wrong_password_is_rejected_regardless_of_verification() {
    let db = pool().await;

    register_student(&db, &register_form("ada", "ada@example.com", "R-100"))
        .await
        .expect("register");

    assert_eq!(
        authenticate(&db, "ada", "not-the-password")
            .await
            .expect("auth"),
        LoginOutcome::InvalidCredentials
    );
    assert_eq!(
        authenticate(&db, "nobody", "hunter22").await.expect("auth"),
        LoginOutcome::InvalidCredentials
    );
}

#[tokio::test]
async fn staff_account_without_profile_bypasses_verification() {
    let db = pool().await;

    let user_id = Uuid::new_v4();
    let hash = auth::hash_password("sup3rv1sor").expect("hash");
    User::create(&db, user_id, "principal", &hash, "principal@example.com")
        .await
        .expect("create user");

    assert_eq!(
        authenticate(&db, "principal", "sup3rv1sor")
            .await
            .expect("auth"),
        LoginOutcome::Success(user_id)
    );
}
