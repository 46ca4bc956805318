use serde::Serialize;

/// Number of bookable rooms. The catalog is static configuration, not data.
pub const ROOM_COUNT: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
}

/// The fixed room catalog, ids 1 through [`ROOM_COUNT`].
pub fn rooms() -> Vec<Room> {
    (1..=ROOM_COUNT)
        .map(|id| Room {
            id,
            name: format!("Room {id}"),
        })
        .collect()
}

pub fn contains(room_id: i64) -> bool {
    (1..=ROOM_COUNT).contains(&room_id)
}
