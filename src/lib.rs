//! # Roomboard
//!
//! A meeting room booking server, usable both as a standalone binary and as a
//! library.
//!
//! Staff log in with a session cookie, pick a date, and book or cancel one of
//! a fixed catalog of rooms. A room can be booked at most once per calendar
//! day; the SQLite store enforces that with a unique constraint on
//! `(room_id, start_date)`.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use roomboard::auth::session::SessionKeys;
//! use roomboard::server::{AppState, create_router};
//! use roomboard::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/roomboard.db").unwrap();
//! store.initialize().unwrap();
//!
//! let keys = SessionKeys::from_secret("a-long-random-secret").unwrap();
//! let state = Arc::new(AppState::new(Arc::new(store), keys));
//! state.credentials.ensure_seed_admin().unwrap();
//!
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
