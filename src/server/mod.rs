mod availability;
pub mod flash;
mod login;
mod pages;
mod router;

pub use router::{AppState, create_router};

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Terminal handler for infrastructure failures: log the cause, answer with a
/// generic 500 page. User-input errors never reach this.
pub(crate) fn failure(err: crate::error::Error) -> Response {
    tracing::error!("request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::failure())).into_response()
}
