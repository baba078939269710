use axum::body::Body;
use axum::http::{Request, StatusCode};
use student_progress::{AppArgs, server};
use tower::ServiceExt;

fn test_args() -> AppArgs {
    let db_path = std::env::temp_dir().join(format!(
        "student-progress-test-{}-{}.db",
        std::process::id(),
        uuid::Uuid::new_v4()
    ));

    AppArgs {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        port: 0,
        smtp_host: None,
        smtp_username: None,
        smtp_password: None,
        mail_from: "School Progress <noreply@school.example>".to_owned(),
        seed: true,
    }
}

#[tokio::test]
async fn login_page_renders() {
    let app = server(test_args()).await.expect("server");

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_pages_redirect_anonymous_users() {
    let app = server(test_args()).await.expect("server");

    for path in ["/dashboard/", "/students/", "/progress/", "/ranking/"] {
        let response = app
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("/"),
            "path {path}"
        );
    }
}

#[tokio::test]
async fn register_page_renders() {
    let app = server(test_args()).await.expect("server");

    let response = app
        .oneshot(
            Request::get("/register/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = server(test_args()).await.expect("server");

    let response = app
        .oneshot(
            Request::get("/nope/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
