use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::Principal;

pub const SESSION_COOKIE: &str = "roomboard_session";

const SESSION_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// HS256 signing keys for session cookies, derived from the externally
/// supplied secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(Error::Config(
                "session signing secret cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Issues a signed session token for an authenticated principal.
    pub fn issue(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Config(format!("failed to sign session token: {e}")))
    }

    /// Validates a session token. Any failure (bad signature, expiry,
    /// malformed token) means "no session".
    pub fn verify(&self, token: &str) -> Option<Principal> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .ok()
            .map(|data| Principal {
                username: data.claims.sub,
            })
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie matching [`session_cookie`] for use with `CookieJar::remove`.
pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_round_trip() {
        let keys = SessionKeys::from_secret("test-secret").unwrap();
        let token = keys.issue("admin").unwrap();

        let principal = keys.verify(&token).unwrap();
        assert_eq!(principal.username, "admin");
    }

    #[test]
    fn rejects_token_signed_with_other_key() {
        let keys = SessionKeys::from_secret("test-secret").unwrap();
        let other = SessionKeys::from_secret("other-secret").unwrap();

        let token = other.issue("admin").unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn rejects_tampered_token() {
        let keys = SessionKeys::from_secret("test-secret").unwrap();
        let token = keys.issue("admin").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(keys.verify(&tampered).is_none());
        assert!(keys.verify("not-a-token").is_none());
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(SessionKeys::from_secret("").is_err());
        assert!(SessionKeys::from_secret("   ").is_err());
    }
}
