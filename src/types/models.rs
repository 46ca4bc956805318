use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A room reservation for a single calendar day. At most one booking exists
/// per (room_id, start_date) pair; the store enforces this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub user_name: String,
    pub user_number: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated identity carried by a verified session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}
