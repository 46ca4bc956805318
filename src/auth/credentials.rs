use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::PasswordEngine;
use crate::error::Result;
use crate::store::Store;
use crate::types::{Principal, User};

pub const SEED_ADMIN_USERNAME: &str = "admin";
const SEED_ADMIN_PASSWORD: &str = "admin123";
const SEED_ADMIN_EMAIL: &str = "admin@example.com";

/// Read-only credential checks over the user table, plus the one-time admin
/// seed. Never logs or returns plaintext passwords or stored hashes.
pub struct CredentialStore {
    store: Arc<dyn Store>,
    engine: PasswordEngine,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            engine: PasswordEngine::new(),
        }
    }

    /// Checks a username/password pair, yielding the principal on a match.
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller; storage failures propagate.
    pub fn verify(&self, username: &str, password: &str) -> Result<Option<Principal>> {
        let Some(user) = self.store.get_user_by_username(username)? else {
            return Ok(None);
        };

        if self.engine.verify(password, &user.password_hash)? {
            Ok(Some(Principal {
                username: user.username,
            }))
        } else {
            Ok(None)
        }
    }

    /// Creates the default admin account if it does not exist yet.
    /// Called once at startup; change the password after first login.
    pub fn ensure_seed_admin(&self) -> Result<()> {
        if self
            .store
            .get_user_by_username(SEED_ADMIN_USERNAME)?
            .is_some()
        {
            return Ok(());
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: SEED_ADMIN_USERNAME.to_string(),
            password_hash: self.engine.hash(SEED_ADMIN_PASSWORD)?,
            email: Some(SEED_ADMIN_EMAIL.to_string()),
            created_at: Utc::now(),
        };
        self.store.create_user(&user)?;

        tracing::info!("Created default admin user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn credentials() -> CredentialStore {
        let store = SqliteStore::new(":memory:").unwrap();
        store.initialize().unwrap();
        CredentialStore::new(Arc::new(store))
    }

    #[test]
    fn seed_admin_is_idempotent() {
        let creds = credentials();
        creds.ensure_seed_admin().unwrap();
        creds.ensure_seed_admin().unwrap();

        let principal = creds.verify("admin", "admin123").unwrap().unwrap();
        assert_eq!(principal.username, "admin");
    }

    #[test]
    fn wrong_password_and_unknown_user_both_fail() {
        let creds = credentials();
        creds.ensure_seed_admin().unwrap();

        assert!(creds.verify("admin", "wrong").unwrap().is_none());
        assert!(creds.verify("nobody", "admin123").unwrap().is_none());
    }
}
