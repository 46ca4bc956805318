pub const SCHEMA: &str = r#"
-- Staff accounts; seeded with a default admin at startup
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,  -- argon2id hash with embedded salt
    email TEXT UNIQUE,            -- optional, unique when present
    created_at TEXT DEFAULT (datetime('now'))
);

-- Room reservations; at most one row per (room_id, start_date)
CREATE TABLE IF NOT EXISTS bookings (
    id TEXT PRIMARY KEY,
    room_id INTEGER NOT NULL,
    start_date TEXT NOT NULL,     -- ISO date (YYYY-MM-DD), day granularity
    user_name TEXT NOT NULL,
    user_number TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(room_id, start_date)
);

CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(start_date);
"#;
