#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use classhopper_api::auth::jwt::{generate_access_token, JwtConfig};
use classhopper_api::auth::password::hash_password;
use classhopper_api::config::ServerConfig;
use classhopper_api::middleware::rate_limit::build_rate_limiter;
use classhopper_api::router::build_app_router;
use classhopper_api::state::AppState;
use classhopper_core::moderation::DEFAULT_BANNED_WORDS;
use classhopper_db::models::admin_user::{AdminUser, CreateAdminUser};
use classhopper_db::repositories::AdminUserRepo;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";
/// Socket address of the reverse proxy in front of the test server.
pub const TEST_PROXY: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Build a test `ServerConfig` with safe defaults and no SMTP.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        hash_salt: "test-salt".to_string(),
        banned_words: DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect(),
        rate_limit_per_minute: 10,
        trusted_proxies: vec![TEST_PROXY],
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        email: None,
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter: build_rate_limiter(config.rate_limit_per_minute),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Mint an access token without touching the database.
pub fn token_for(user_id: i64, role: &str) -> String {
    let config = test_config();
    generate_access_token(user_id, role, &config.jwt).expect("token generation should succeed")
}

pub fn admin_token() -> String {
    token_for(1, "admin")
}

/// Insert a moderator account whose password is [`TEST_PASSWORD`].
pub async fn create_account(pool: &PgPool, email: &str, role: &str) -> AdminUser {
    let input = CreateAdminUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    AdminUserRepo::create(pool, &input)
        .await
        .expect("account creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST as an anonymous client behind the trusted proxy, which reports
/// `client_ip` in `X-Forwarded-For`.
pub async fn post_json_from(app: Router, uri: &str, body: Value, client_ip: &str) -> Response<Body> {
    post_json_via(app, uri, body, TEST_PROXY, client_ip).await
}

/// POST from socket address `peer` carrying an arbitrary `X-Forwarded-For`.
pub async fn post_json_via(
    app: Router,
    uri: &str,
    body: Value,
    peer: IpAddr,
    forwarded_for: &str,
) -> Response<Body> {
    let mut request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", forwarded_for)
        .header("user-agent", "integration-test")
        .body(Body::from(body.to_string()))
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::new(peer, 40000)));
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn project(name: &str) -> Value {
    json!({
        "projectName": name,
        "projectSummary": "A project summary long enough",
        "projectCategory": "web",
        "projectTechTags": ["React", "Node"],
        "projectStatus": "idea"
    })
}

/// A registration form that passes validation.
pub fn registration(clan: &str) -> Value {
    json!({
        "firstName": "Ali",
        "lastName": "Yılmaz",
        "phone": "05551234567",
        "university": "X",
        "department": "Y",
        "classYear": "2",
        "clanName": clan,
        "clanRole": "leader",
        "projects": [project("P1")],
        "consentKVKK": true
    })
}

pub fn topic_suggestion() -> Value {
    json!({
        "title": "Rust study group",
        "body": "Weekly meetups to read the book together",
        "categoryId": "general",
        "tagIds": ["rust"]
    })
}

/// Submit a registration through the public endpoint and return its id.
pub async fn submit_registration(app: Router, payload: Value, client_ip: &str) -> i64 {
    let response = post_json_from(app, "/api/v1/public/submissions", payload, client_ip).await;
    assert_eq!(response.status(), 200);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("receipt carries an id")
}
