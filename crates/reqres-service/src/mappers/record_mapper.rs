//! Raw record to [`User`] mapping.

use reqres_core::User;
use serde_json::Value;

/// Keys every raw user record must carry.
pub const USER_FIELDS: [&str; 5] = ["id", "email", "first_name", "last_name", "avatar"];

/// Maps one raw record into a [`User`].
///
/// Returns `None` when any required field is missing, `null`, or not
/// coercible: `id` must be an integer (or an integer string), the text fields
/// must be strings or numbers. Rejection is an expected outcome, not an error.
#[must_use]
pub fn map_user(raw: &Value) -> Option<User> {
    let record = raw.as_object()?;

    let id = integer(record.get("id")?)?;
    let email = text(record.get("email")?)?;
    let first_name = text(record.get("first_name")?)?;
    let last_name = text(record.get("last_name")?)?;
    let avatar = text(record.get("avatar")?)?;

    Some(User::new(id, email, first_name, last_name, avatar))
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
