//! Router-level tests for the login flow and the authorization middleware.

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use credential_service::repository::{InMemoryUserRepository, NewUser, UserRepository};
use credential_service::token::{verify_refresh, RefreshCheck};
use credential_service::{routes, AppState, Config};
use http_body_util::BodyExt;
use secrecy::SecretString;
use service_common::{ActivityLogClient, ActivityLogConfig, JsonEnvelope};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use url::Url;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        signing_secret: SecretString::from("integration-test-secret".to_string()),
        log_service_url: Url::parse("http://127.0.0.1:9").unwrap(),
    }
}

async fn test_app() -> (Router, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    repo.insert(NewUser {
        email: "me@here.com".to_string(),
        first_name: "Me".to_string(),
        last_name: "Here".to_string(),
        password: "verysecret".to_string(),
        active: 1,
    })
    .await
    .unwrap();

    // Unreachable sink with a short deadline: detached log calls must not
    // affect any outcome below.
    let activity_log = ActivityLogClient::new(
        ActivityLogConfig::new(Url::parse("http://127.0.0.1:9").unwrap(), "test")
            .with_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let state = AppState::new(test_config(), repo.clone() as Arc<dyn UserRepository>, activity_log);
    (routes::router(state), repo)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 51234))));
    request
}

async fn envelope_of(response: axum::response::Response) -> JsonEnvelope {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> (StatusCode, Option<String>, JsonEnvelope) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/authenticate",
            serde_json::json!({"email": "me@here.com", "password": "verysecret"}),
        ))
        .await
        .unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    (status, cookie, envelope_of(response).await)
}

#[tokio::test]
async fn login_issues_both_credentials_and_persists_verifier() {
    let (app, repo) = test_app().await;
    let (status, cookie, envelope) = login(&app).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(!envelope.error);
    assert!(!envelope.access_token.as_deref().unwrap().is_empty());
    assert!(!envelope.refresh_token.as_deref().unwrap().is_empty());
    assert_eq!(envelope.data.as_ref().unwrap()["email"], "me@here.com");

    let cookie = cookie.unwrap();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let verifier = repo.get_refresh_verifier(1).await.unwrap().unwrap();
    assert_eq!(
        verify_refresh(&verifier, envelope.refresh_token.as_deref().unwrap()),
        RefreshCheck::Ok
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let (app, _repo) = test_app().await;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/authenticate",
            serde_json::json!({"email": "me@here.com", "password": "not-it"}),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .clone()
        .oneshot(post_json(
            "/authenticate",
            serde_json::json!({"email": "nobody@here.com", "password": "verysecret"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);

    let body_a = wrong_password.into_body().collect().await.unwrap().to_bytes();
    let body_b = unknown_email.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (app, _repo) = test_app().await;
    let mut request = Request::builder()
        .method("POST")
        .uri("/authenticate")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 51234))));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(envelope_of(response).await.error);
}

#[tokio::test]
async fn second_login_invalidates_first_refresh_credential() {
    let (app, repo) = test_app().await;

    let (_, _, first) = login(&app).await;
    let (_, _, second) = login(&app).await;

    let first_refresh = first.refresh_token.unwrap();
    let second_refresh = second.refresh_token.unwrap();
    assert_ne!(first_refresh, second_refresh);

    let stored = repo.get_refresh_verifier(1).await.unwrap().unwrap();
    assert_eq!(verify_refresh(&stored, &first_refresh), RefreshCheck::Mismatch);
    assert_eq!(verify_refresh(&stored, &second_refresh), RefreshCheck::Ok);
}

#[tokio::test]
async fn protected_route_rejects_missing_credential() {
    let (app, _repo) = test_app().await;
    let request = Request::builder()
        .uri("/users")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(envelope_of(response).await.error);
}

#[tokio::test]
async fn protected_route_accepts_cookie_from_login() {
    let (app, _repo) = test_app().await;
    let (_, _, envelope) = login(&app).await;
    let token = envelope.access_token.unwrap();

    let request = Request::builder()
        .uri("/users")
        .header(COOKIE, format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let envelope = envelope_of(response).await;
    assert!(!envelope.error);
    assert!(envelope.data.unwrap().as_array().unwrap().len() == 1);
}

#[tokio::test]
async fn protected_route_accepts_bearer_header() {
    let (app, _repo) = test_app().await;
    let (_, _, envelope) = login(&app).await;
    let token = envelope.access_token.unwrap();

    let request = Request::builder()
        .uri("/users")
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn protected_route_rejects_tampered_credential() {
    let (app, _repo) = test_app().await;
    let (_, _, envelope) = login(&app).await;
    let mut token = envelope.access_token.unwrap();
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let request = Request::builder()
        .uri("/users")
        .header(COOKIE, format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_then_login_round_trips() {
    let (app, _repo) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/register",
            serde_json::json!({"email": "new@here.com", "password": "alsosecret", "active": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app
        .oneshot(post_json(
            "/authenticate",
            serde_json::json!({"email": "new@here.com", "password": "alsosecret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}
