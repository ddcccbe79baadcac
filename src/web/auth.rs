//! Static-password cookie gate.
//!
//! A correct login sets a long-lived cookie whose value is the
//! percent-encoded password; every protected request must carry it.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use tracing::warn;

use super::AppState;
use crate::config::AuthConfig;

/// Cookie lifetime in seconds (the largest positive 32-bit value).
pub const COOKIE_MAX_AGE: u32 = 2_147_483_647;

#[derive(Debug, Clone)]
pub struct AuthGate {
    cookie_name: String,
    password: String,
    login_path: String,
    secure: bool,
    login_delay: Duration,
}

impl AuthGate {
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            password: config.password.clone(),
            login_path: config.login_path.clone(),
            secure: config.secure_cookie,
            login_delay: Duration::from_secs(config.login_delay_secs),
        }
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    #[must_use]
    pub fn password_matches(&self, attempt: &str) -> bool {
        constant_time_eq(attempt.as_bytes(), self.password.as_bytes())
    }

    /// True if the request carries the session cookie.
    #[must_use]
    pub fn is_authorized(&self, headers: &HeaderMap) -> bool {
        cookie_values(headers, &self.cookie_name).any(|value| {
            urlencoding::decode(value).is_ok_and(|password| self.password_matches(&password))
        })
    }

    /// `Set-Cookie` value issued after a successful login.
    ///
    /// The password is percent-encoded, so any password survives the
    /// round trip through the `Cookie` header.
    #[must_use]
    pub fn session_cookie(&self) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{}={}; Max-Age={COOKIE_MAX_AGE}; Path=/; HttpOnly; SameSite=Strict{secure}",
            self.cookie_name,
            urlencoding::encode(&self.password)
        )
    }
}

/// Values of every cookie called `name` across all `Cookie` headers.
fn cookie_values<'a>(headers: &'a HeaderMap, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(move |pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then_some(value.trim())
        })
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware for the protected routes: `403` without the session cookie.
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.auth().is_authorized(request.headers()) {
        next.run(request).await
    } else {
        warn!(http.path = %request.uri().path(), "Rejected request without session cookie");
        StatusCode::FORBIDDEN.into_response()
    }
}
