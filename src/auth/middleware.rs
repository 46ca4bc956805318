use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::session::SESSION_COOKIE;
use crate::server::AppState;
use crate::server::flash::{self, Flash};

/// Extractor gating protected handlers on a valid session cookie.
///
/// A request without one is redirected to the login page with the originally
/// requested URL preserved in `next`, so the browser lands back where it was
/// headed after logging in.
pub struct RequireSession(pub crate::types::Principal);

/// Rejection for [`RequireSession`]: the no-session outcome.
pub struct LoginRedirect {
    next: String,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        let jar = flash::push(
            CookieJar::new(),
            Flash::error("Please log in to access this page"),
        );
        let target = format!("/login?next={}", urlencoding::encode(&self.next));
        (jar, Redirect::to(&target)).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RequireSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let principal = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| state.session_keys.verify(cookie.value()));

        match principal {
            Some(principal) => Ok(RequireSession(principal)),
            None => Err(LoginRedirect {
                next: original_uri(parts),
            }),
        }
    }
}

fn original_uri(parts: &Parts) -> String {
    parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string())
}
