use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

use super::AppState;
use super::flash::{self, Flash};
use super::pages;
use crate::auth::RequireSession;
use crate::booking::{Ledger, availability, catalog, dates};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    date: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Book,
    Cancel,
}

#[derive(Debug, Deserialize)]
pub struct BookingForm {
    room_id: i64,
    action: BookingAction,
    start_date: String,
    user_name: Option<String>,
    user_number: Option<String>,
}

pub async fn view(
    RequireSession(principal): RequireSession,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<GridQuery>,
) -> Response {
    let (jar, mut flashes) = flash::take(jar);

    // A malformed date in the URL is only worth a warning; fall back to today
    let date = match query.date.as_deref() {
        Some(raw) => match dates::parse_display_date(raw) {
            Ok(date) => date,
            Err(_) => {
                flashes.push(Flash::warning("Invalid date format in URL."));
                dates::today()
            }
        },
        None => dates::today(),
    };

    let bookings = match state.ledger.bookings_for(date) {
        Ok(bookings) => bookings,
        Err(err) => return super::failure(err),
    };
    let grid = availability::build_grid(&catalog::rooms(), bookings);

    let html = pages::availability(
        &principal.username,
        &dates::format_display_date(date),
        &grid,
        &flashes,
    );
    (jar, Html(html)).into_response()
}

pub async fn submit(
    RequireSession(_principal): RequireSession,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<BookingForm>,
) -> Response {
    let date = match dates::parse_display_date(&form.start_date) {
        Ok(date) => date,
        // No usable date to scope the redirect to, so land on today's view
        Err(err) => return finish(jar, Flash::from_error(&err), "/availability"),
    };

    // Round-trip the submitted date string so the address bar shows exactly
    // what was selected
    let target = format!("/availability?date={}", form.start_date);

    match apply(&state.ledger, &form, date) {
        Ok(notice) => finish(jar, notice, &target),
        Err(err) => match Flash::from_error(&err) {
            Some(notice) => finish(jar, Some(notice), &target),
            None => super::failure(err),
        },
    }
}

/// One book/cancel transition against the ledger. `Ok(None)` is the silent
/// no-op cancel of a booking that never existed.
fn apply(ledger: &Ledger, form: &BookingForm, date: NaiveDate) -> Result<Option<Flash>> {
    if !catalog::contains(form.room_id) {
        return Err(Error::Validation("Unknown room selected.".to_string()));
    }

    match form.action {
        BookingAction::Book => {
            let booking = ledger.book(
                form.room_id,
                date,
                form.user_name.as_deref().unwrap_or(""),
                form.user_number.as_deref().unwrap_or(""),
            )?;
            Ok(Some(Flash::success(format!(
                "Room {} booked successfully!",
                booking.room_id
            ))))
        }
        BookingAction::Cancel => {
            if ledger.cancel(form.room_id, date)? {
                Ok(Some(Flash::success(format!(
                    "Booking for Room {} canceled successfully.",
                    form.room_id
                ))))
            } else {
                Ok(None)
            }
        }
    }
}

fn finish(jar: CookieJar, notice: Option<Flash>, target: &str) -> Response {
    let jar = match notice {
        Some(notice) => flash::push(jar, notice),
        None => jar,
    };
    (jar, Redirect::to(target)).into_response()
}
