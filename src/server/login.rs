use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::AppState;
use super::flash::{self, Flash};
use super::pages;
use crate::auth::session::{self, SESSION_COOKIE};
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Only same-site absolute paths may be used as post-login targets.
fn sanitize_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
}

fn has_session(state: &AppState, jar: &CookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| state.session_keys.verify(cookie.value()))
        .is_some()
}

pub async fn login_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
) -> Response {
    if has_session(&state, &jar) {
        return Redirect::to("/availability").into_response();
    }

    let (jar, flashes) = flash::take(jar);
    let next = sanitize_next(query.next.as_deref());
    (jar, Html(pages::login(&flashes, next))).into_response()
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Response {
    let principal = match state.credentials.verify(&form.username, &form.password) {
        Ok(Some(principal)) => principal,
        Ok(None) => {
            let (jar, mut flashes) = flash::take(jar);
            flashes.extend(Flash::from_error(&Error::Authentication));
            let next = sanitize_next(query.next.as_deref());
            return (jar, Html(pages::login(&flashes, next))).into_response();
        }
        Err(err) => return super::failure(err),
    };

    let token = match state.session_keys.issue(&principal.username) {
        Ok(token) => token,
        Err(err) => return super::failure(err),
    };

    let jar = jar.add(session::session_cookie(token));
    let target = sanitize_next(query.next.as_deref()).unwrap_or("/availability");
    (jar, Redirect::to(target)).into_response()
}

pub async fn logout(jar: CookieJar) -> Response {
    let jar = jar.remove(session::clear_cookie());
    let jar = flash::push(jar, Flash::info("You have been logged out"));
    (jar, Redirect::to("/login")).into_response()
}

/// Visiting the root always drops the session and lands on the login page.
pub async fn root(jar: CookieJar) -> Response {
    let jar = jar.remove(session::clear_cookie());
    (jar, Redirect::to("/login")).into_response()
}
