use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid username or password")]
    Authentication,

    #[error("invalid date: {0}")]
    DateFormat(String),

    #[error("{0}")]
    Validation(String),

    #[error("room {room_id} is already booked for {date}")]
    Conflict { room_id: i64, date: NaiveDate },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
