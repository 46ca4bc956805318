use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use super::availability;
use super::login;
use crate::auth::CredentialStore;
use crate::auth::session::SessionKeys;
use crate::booking::Ledger;
use crate::store::Store;

pub struct AppState {
    pub credentials: CredentialStore,
    pub ledger: Ledger,
    pub session_keys: SessionKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, session_keys: SessionKeys) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            ledger: Ledger::new(store),
            session_keys,
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(login::root))
        .route("/login", get(login::login_form).post(login::login_submit))
        .route("/logout", get(login::logout))
        .route(
            "/availability",
            get(availability::view).post(availability::submit),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
