use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn booking_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        room_id: row.get(1)?,
        start_date: parse_date(&row.get::<_, String>(2)?).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        user_name: row.get(3)?,
        user_number: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // User operations

    fn create_user(&self, user: &User) -> Result<()> {
        self.conn().execute(
            "INSERT INTO users (id, username, password_hash, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.username,
                user.password_hash,
                user.email,
                format_datetime(&user.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, username, password_hash, email, created_at
             FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    email: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    // Booking operations

    fn create_booking(&self, booking: &Booking) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO bookings (id, room_id, start_date, user_name, user_number, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                booking.id,
                booking.room_id,
                format_date(booking.start_date),
                booking.user_name,
                booking.user_number,
                format_datetime(&booking.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::Conflict {
                    room_id: booking.room_id,
                    date: booking.start_date,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_booking(&self, room_id: i64, date: NaiveDate) -> Result<Option<Booking>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, room_id, start_date, user_name, user_number, created_at
             FROM bookings WHERE room_id = ?1 AND start_date = ?2",
            params![room_id, format_date(date)],
            booking_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn delete_booking(&self, room_id: i64, date: NaiveDate) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM bookings WHERE room_id = ?1 AND start_date = ?2",
            params![room_id, format_date(date)],
        )?;
        Ok(rows > 0)
    }

    fn list_bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, room_id, start_date, user_name, user_number, created_at
             FROM bookings WHERE start_date = ?1 ORDER BY room_id",
        )?;

        let rows = stmt.query_map(params![format_date(date)], booking_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn open_store() -> SqliteStore {
        let store = SqliteStore::new(":memory:").unwrap();
        store.initialize().unwrap();
        store
    }

    fn booking(room_id: i64, date: NaiveDate, name: &str, number: &str) -> Booking {
        Booking {
            id: Uuid::new_v4().to_string(),
            room_id,
            start_date: date,
            user_name: name.to_string(),
            user_number: number.to_string(),
            created_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn booking_absent_until_created() {
        let store = open_store();
        let day = date("2025-06-15");

        assert!(store.get_booking(3, day).unwrap().is_none());

        store.create_booking(&booking(3, day, "Jane Doe", "555-1234")).unwrap();

        let found = store.get_booking(3, day).unwrap().unwrap();
        assert_eq!(found.room_id, 3);
        assert_eq!(found.user_name, "Jane Doe");
        assert_eq!(found.user_number, "555-1234");
    }

    #[test]
    fn duplicate_booking_is_a_conflict() {
        let store = open_store();
        let day = date("2025-06-15");

        store.create_booking(&booking(3, day, "Jane Doe", "555-1234")).unwrap();

        let err = store
            .create_booking(&booking(3, day, "John Smith", "555-9999"))
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { room_id: 3, .. }));

        // The original row is untouched
        let found = store.get_booking(3, day).unwrap().unwrap();
        assert_eq!(found.user_name, "Jane Doe");
        assert_eq!(store.list_bookings_for_date(day).unwrap().len(), 1);
    }

    #[test]
    fn book_then_cancel_round_trip() {
        let store = open_store();
        let day = date("2025-06-15");

        store.create_booking(&booking(3, day, "Jane Doe", "555-1234")).unwrap();
        assert!(store.delete_booking(3, day).unwrap());
        assert!(store.get_booking(3, day).unwrap().is_none());

        // Pair is bookable again
        store.create_booking(&booking(3, day, "John Smith", "555-9999")).unwrap();
    }

    #[test]
    fn cancel_of_missing_booking_reports_false() {
        let store = open_store();
        assert!(!store.delete_booking(3, date("2025-06-15")).unwrap());
    }

    #[test]
    fn bookings_are_scoped_to_room_and_date() {
        let store = open_store();
        let day = date("2025-06-15");
        let other_day = date("2025-06-16");

        store.create_booking(&booking(3, day, "Jane Doe", "555-1234")).unwrap();

        // Same room on another day and another room on the same day both work
        store.create_booking(&booking(3, other_day, "Ada", "555-0001")).unwrap();
        store.create_booking(&booking(4, day, "Grace", "555-0002")).unwrap();

        let for_day = store.list_bookings_for_date(day).unwrap();
        assert_eq!(for_day.len(), 2);
        assert_eq!(for_day[0].room_id, 3);
        assert_eq!(for_day[1].room_id, 4);
    }

    #[test]
    fn usernames_are_unique() {
        let store = open_store();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: "admin".to_string(),
            password_hash: "hash".to_string(),
            email: None,
            created_at: Utc::now(),
        };
        store.create_user(&user).unwrap();
        assert!(store.get_user_by_username("admin").unwrap().is_some());
        assert!(store.get_user_by_username("nobody").unwrap().is_none());

        let dup = User {
            id: Uuid::new_v4().to_string(),
            ..user
        };
        assert!(store.create_user(&dup).is_err());
    }
}
