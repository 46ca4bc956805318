mod credentials;
mod middleware;
mod password;
pub mod session;

pub use credentials::{CredentialStore, SEED_ADMIN_USERNAME};
pub use middleware::RequireSession;
pub use password::PasswordEngine;
