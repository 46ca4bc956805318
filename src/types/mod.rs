mod models;

pub use models::{Booking, Principal, User};
