//! Domain records.

mod user;

pub use user::*;
