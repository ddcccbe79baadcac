//! Common test utilities

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use one_list::config::AuthConfig;
use one_list::item::ItemStore;
use one_list::storage::MemoryStorage;
use one_list::template::TemplateEngine;
use one_list::web::{router, AppState};
use tower::ServiceExt;

pub const PASSWORD: &str = "letmein";

/// Cookie header a logged-in browser sends.
pub const SESSION_COOKIE: &str = "one_list_auth=letmein";

/// 2024-07-15 12:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
}

/// Router over `storage` with a fixed clock and no login delay.
pub fn test_app(storage: MemoryStorage) -> Router {
    test_app_with_password(storage, PASSWORD)
}

pub fn test_app_with_password(storage: MemoryStorage, password: &str) -> Router {
    let store = ItemStore::with_clock(Box::new(storage), Box::new(fixed_now));
    let templates = TemplateEngine::new().expect("Templates should compile");
    let auth = AuthConfig {
        password: password.to_string(),
        login_delay_secs: 0,
        ..AuthConfig::default()
    };
    router(AppState::new(store, templates, &auth))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("Router is infallible")
}

/// Authenticated `GET`.
pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(COOKIE, SESSION_COOKIE)
        .body(Body::empty())
        .unwrap()
}

/// Authenticated form `POST`.
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(COOKIE, SESSION_COOKIE)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body should be readable");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

#[allow(dead_code)] // Not every test binary checks redirects
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
