use std::collections::HashMap;

use crate::booking::catalog::Room;
use crate::types::Booking;

#[derive(Debug, Clone)]
pub enum RoomStatus {
    Free,
    Booked(Booking),
}

impl RoomStatus {
    pub fn is_free(&self) -> bool {
        matches!(self, RoomStatus::Free)
    }
}

#[derive(Debug, Clone)]
pub struct RoomAvailability {
    pub room: Room,
    pub status: RoomStatus,
}

/// Joins the room catalog against one day's ledger snapshot.
/// Bookings for rooms outside the catalog are ignored.
pub fn build_grid(catalog: &[Room], bookings: Vec<Booking>) -> Vec<RoomAvailability> {
    let mut by_room: HashMap<i64, Booking> =
        bookings.into_iter().map(|b| (b.room_id, b)).collect();

    catalog
        .iter()
        .map(|room| RoomAvailability {
            room: room.clone(),
            status: by_room
                .remove(&room.id)
                .map(RoomStatus::Booked)
                .unwrap_or(RoomStatus::Free),
        })
        .collect()
}
