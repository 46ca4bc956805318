mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // User operations
    fn create_user(&self, user: &User) -> Result<()>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    // Booking operations
    fn create_booking(&self, booking: &Booking) -> Result<()>;
    fn get_booking(&self, room_id: i64, date: NaiveDate) -> Result<Option<Booking>>;
    fn delete_booking(&self, room_id: i64, date: NaiveDate) -> Result<bool>;
    fn list_bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>>;
}
