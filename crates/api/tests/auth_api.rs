//! HTTP-level tests for moderator login.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_account, get_auth, post_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

const LOGIN: &str = "/api/v1/auth/login";

async fn login(app: axum::Router, email: &str, password: &str) -> axum::http::Response<axum::body::Body> {
    post_json(app, LOGIN, json!({ "email": email, "password": password })).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_issues_token(pool: PgPool) {
    let account = create_account(&pool, "mod@example.com", "admin").await;
    let app = common::build_test_app(pool);

    let response = login(app, "mod@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], account.id);
    assert_eq!(json["user"]["email"], "mod@example.com");
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    create_account(&pool, "mod@example.com", "admin").await;
    let app = common::build_test_app(pool);

    let response = login(app, "mod@example.com", "not-the-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = login(app, "nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_account_is_forbidden(pool: PgPool) {
    let account = create_account(&pool, "mod@example.com", "admin").await;
    sqlx::query("UPDATE admin_users SET is_active = false WHERE id = $1")
        .bind(account.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = login(app, "mod@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn issued_token_grants_role_access(pool: PgPool) {
    create_account(&pool, "admin@example.com", "admin").await;
    create_account(&pool, "viewer@example.com", "viewer").await;
    let app = common::build_test_app(pool);

    let admin = body_json(login(app.clone(), "admin@example.com", TEST_PASSWORD).await).await;
    let token = admin["access_token"].as_str().unwrap();
    let response = get_auth(app.clone(), "/api/v1/admin/submissions", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let viewer = body_json(login(app.clone(), "viewer@example.com", TEST_PASSWORD).await).await;
    let token = viewer["access_token"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/admin/submissions", token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/clans", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
