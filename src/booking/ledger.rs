use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::Booking;

/// The authoritative record of room-date reservations.
///
/// Uniqueness of `(room_id, date)` is enforced by the store's schema, so a
/// conflicting `book` fails with [`Error::Conflict`] even under concurrent
/// requests.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn Store>,
}

impl Ledger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn find(&self, room_id: i64, date: NaiveDate) -> Result<Option<Booking>> {
        self.store.get_booking(room_id, date)
    }

    /// Records a booking for the given room and day.
    pub fn book(
        &self,
        room_id: i64,
        date: NaiveDate,
        user_name: &str,
        user_number: &str,
    ) -> Result<Booking> {
        let user_name = user_name.trim();
        let user_number = user_number.trim();

        if user_name.is_empty() || user_number.is_empty() {
            return Err(Error::Validation(
                "Name and phone number are required to book a room.".to_string(),
            ));
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            room_id,
            start_date: date,
            user_name: user_name.to_string(),
            user_number: user_number.to_string(),
            created_at: Utc::now(),
        };

        self.store.create_booking(&booking)?;
        Ok(booking)
    }

    /// Removes the booking for the given room and day, reporting whether one
    /// existed.
    pub fn cancel(&self, room_id: i64, date: NaiveDate) -> Result<bool> {
        self.store.delete_booking(room_id, date)
    }

    /// Snapshot of all bookings for one day.
    pub fn bookings_for(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        self.store.list_bookings_for_date(date)
    }
}
