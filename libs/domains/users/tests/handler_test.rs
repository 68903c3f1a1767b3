//! Handler tests for the users domain
//!
//! Mounts the auth and admin routers the way the API does and drives
//! signup, login and role management over the in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{ErrorResponse, JwtConfig, TokenService};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn tokens() -> TokenService {
    TokenService::new(&JwtConfig::new("users-handler-test-secret-0123456789").unwrap())
}

fn app(tokens: TokenService) -> Router {
    let service = UserService::new(
        InMemoryUserRepository::new(),
        tokens.clone(),
        PromotionPolicy::new(["dean@example.edu"]),
    );

    Router::new()
        .nest("/auth", auth_router::<InMemoryUserRepository>())
        .nest("/admin", admin_router::<InMemoryUserRepository>(tokens))
        .with_state(Arc::new(service))
}

fn post(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn signup_and_login(app: &Router, name: &str, email: &str) -> LoginResponse {
    let response = app
        .clone()
        .oneshot(post(
            "/auth/signup",
            None,
            json!({"name": name, "email": email, "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post(
            "/auth/login",
            None,
            json!({"email": email, "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_signup_returns_201_message() {
    let response = app(tokens())
        .oneshot(post(
            "/auth/signup",
            None,
            json!({"name": "A", "email": "a@x.edu", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: MessageResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Signup successful");
}

#[tokio::test]
async fn test_signup_missing_field_is_400() {
    let response = app(tokens())
        .oneshot(post(
            "/auth/signup",
            None,
            json!({"name": "A", "email": "a@x.edu"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "All fields required");
}

#[tokio::test]
async fn test_duplicate_signup_is_400() {
    let app = app(tokens());
    signup_and_login(&app, "A", "a@x.edu").await;

    let response = app
        .oneshot(post(
            "/auth/signup",
            None,
            json!({"name": "B", "email": "a@x.edu", "password": "other"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "User already exists");
}

#[tokio::test]
async fn test_duplicate_signup_keeps_first_account() {
    let app = app(tokens());
    let first = signup_and_login(&app, "Dean", "dean@example.edu").await;
    assert_eq!(first.role, Role::Admin);

    let response = app
        .clone()
        .oneshot(post(
            "/auth/signup",
            None,
            json!({"name": "Impostor", "email": "dean@example.edu", "password": "other"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post(
            "/auth/login",
            None,
            json!({"email": "dean@example.edu", "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let again: LoginResponse = json_body(response.into_body()).await;
    assert_eq!(again.role, Role::Admin);

    let response = app
        .oneshot(post(
            "/auth/login",
            None,
            json!({"email": "dean@example.edu", "password": "other"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_is_400() {
    let app = app(tokens());
    signup_and_login(&app, "A", "a@x.edu").await;

    let response = app
        .oneshot(post(
            "/auth/login",
            None,
            json!({"email": "a@x.edu", "password": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Invalid credentials");
}

#[tokio::test]
async fn test_login_role_reflects_promotion_policy() {
    let app = app(tokens());

    let student = signup_and_login(&app, "S", "s@x.edu").await;
    assert_eq!(student.role, Role::Student);

    let dean = signup_and_login(&app, "Dean", "dean@example.edu").await;
    assert_eq!(dean.role, Role::Admin);
}

#[tokio::test]
async fn test_admin_grants_role() {
    let tokens = tokens();
    let app = app(tokens.clone());
    let dean = signup_and_login(&app, "Dean", "dean@example.edu").await;
    signup_and_login(&app, "S", "s@x.edu").await;

    let response = app
        .clone()
        .oneshot(post(
            "/admin/role",
            Some(&dean.token),
            json!({"email": "s@x.edu", "action": "grant"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Successfully granted admin access");

    // A fresh login now carries the admin role
    let response = app
        .oneshot(post(
            "/auth/login",
            None,
            json!({"email": "s@x.edu", "password": "pw"}),
        ))
        .await
        .unwrap();
    let login: LoginResponse = json_body(response.into_body()).await;
    assert_eq!(login.role, Role::Admin);
    assert!(tokens.verify(&login.token).unwrap().is_admin());
}

#[tokio::test]
async fn test_student_cannot_manage_roles() {
    let app = app(tokens());
    let student = signup_and_login(&app, "S", "s@x.edu").await;

    let response = app
        .oneshot(post(
            "/admin/role",
            Some(&student.token),
            json!({"email": "s@x.edu", "action": "grant"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Admin access only");
}

#[tokio::test]
async fn test_role_without_token_is_401() {
    let response = app(tokens())
        .oneshot(post(
            "/admin/role",
            None,
            json!({"email": "s@x.edu", "action": "grant"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_unknown_user_and_bad_action() {
    let tokens = tokens();
    let admin_token = tokens.issue("seeded-admin", "admin").unwrap();
    let app = app(tokens);

    let response = app
        .clone()
        .oneshot(post(
            "/admin/role",
            Some(&admin_token),
            json!({"email": "ghost@x.edu", "action": "grant"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "User not found");

    let response = app
        .oneshot(post(
            "/admin/role",
            Some(&admin_token),
            json!({"email": "ghost@x.edu", "action": "promote"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Invalid request");
}
