//! HTTP surface: routes, the cookie gate, and request logging.

pub mod auth;
pub mod forms;
mod handlers;
mod request_logging;

pub use auth::AuthGate;
pub use request_logging::{RequestLoggingLayer, RequestLoggingService};

use axum::routing::{get, post};
use axum::{middleware, Router};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::item::ItemStore;
use crate::template::TemplateEngine;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ItemStore>>,
    templates: Arc<TemplateEngine>,
    auth: Arc<AuthGate>,
}

impl AppState {
    #[must_use]
    pub fn new(store: ItemStore, templates: TemplateEngine, auth: &AuthConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            templates: Arc::new(templates),
            auth: Arc::new(AuthGate::from_config(auth)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// The lock is never held across an await point.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut ItemStore) -> R) -> R {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateEngine {
        &self.templates
    }

    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Close the storage once the server has stopped.
    pub fn close(self) {
        match Arc::try_unwrap(self.store) {
            Ok(store) => store
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner)
                .close(),
            Err(_) => warn!("Store still shared at shutdown; storage left open"),
        }
    }
}

/// Build the router. Everything except login and health needs the cookie.
pub fn router(state: AppState) -> Router {
    let login_path = state.auth().login_path().to_string();

    let protected = Router::new()
        .route("/", get(handlers::view_all))
        .route("/view", get(handlers::view))
        .route("/edit", get(handlers::edit))
        .route("/save", post(handlers::save))
        .route("/create", post(handlers::create))
        .route("/delete", get(handlers::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(protected)
        .route(
            &login_path,
            get(handlers::login_page).post(handlers::login_submit),
        )
        .route("/health", get(handlers::health))
        .layer(RequestLoggingLayer)
        .with_state(state)
}

/// Serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
