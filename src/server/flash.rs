//! One-shot notices carried across a redirect in a short-lived cookie.
//!
//! Handlers pass notices around explicitly: `push` queues one for the next
//! page load, `take` drains the queue when a page renders. There is no
//! ambient request state.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const FLASH_COOKIE: &str = "roomboard_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// User-visible notice for a workflow error. Infrastructure errors yield
    /// `None` and must propagate to the failure handler instead.
    pub fn from_error(err: &Error) -> Option<Flash> {
        match err {
            Error::Authentication => Some(Flash::error("Invalid username or password")),
            Error::DateFormat(_) => {
                Some(Flash::error("Invalid date format in form submission."))
            }
            Error::Validation(message) => Some(Flash::error(message.clone())),
            Error::Conflict { room_id, .. } => Some(Flash::error(format!(
                "Room {room_id} is already booked for this date."
            ))),
            Error::Database(_) | Error::Config(_) => None,
        }
    }
}

fn encode(flashes: &[Flash]) -> String {
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(raw: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(raw)
        .ok()
        .and_then(|json| serde_json::from_slice(&json).ok())
        .unwrap_or_default()
}

fn cookie(flashes: &[Flash]) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, encode(flashes)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Queues a notice for the next rendered page.
pub fn push(jar: CookieJar, flash: Flash) -> CookieJar {
    let mut pending = jar.get(FLASH_COOKIE).map(|c| decode(c.value())).unwrap_or_default();
    pending.push(flash);
    jar.add(cookie(&pending))
}

/// Drains all pending notices, clearing the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    match jar.get(FLASH_COOKIE) {
        Some(c) => {
            let flashes = decode(c.value());
            let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
            (jar, flashes)
        }
        None => (jar, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let flashes = vec![
            Flash::success("Room 3 booked successfully!"),
            Flash::error("Invalid username or password"),
        ];
        assert_eq!(decode(&encode(&flashes)), flashes);
    }

    #[test]
    fn decode_tolerates_garbage() {
        assert!(decode("not-base64!").is_empty());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"not json")).is_empty());
    }

    #[test]
    fn push_then_take_drains_in_order() {
        let jar = push(CookieJar::new(), Flash::info("first"));
        let jar = push(jar, Flash::warning("second"));

        let (jar, flashes) = take(jar);
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(flashes[1].level, Level::Warning);

        let (_, rest) = take(jar);
        assert!(rest.is_empty());
    }

    #[test]
    fn infrastructure_errors_have_no_notice() {
        let err = Error::Config("bad".to_string());
        assert!(Flash::from_error(&err).is_none());
    }
}
