//! Payload envelope validation.

use super::map_user;
use reqres_core::{Page, ReqResError, ReqResResult, User};
use serde_json::{Map, Value};
use tracing::debug;

/// Keys the payload envelope must carry.
pub const ENVELOPE_FIELDS: [&str; 5] = ["page", "per_page", "total", "total_pages", "data"];

/// Decodes and validates an upstream payload.
///
/// Fails with [`ReqResError::Decode`] if the bytes are not JSON, the document
/// is not an object, any envelope key is missing or `null`, a pagination
/// number is not a non-negative integer, or `data` is not an array. Records
/// inside `data` that do not map are dropped individually, keeping the order
/// of the rest. Pagination numbers are taken from the payload as reported.
pub fn decode_user_page(body: &[u8]) -> ReqResResult<Page<User>> {
    let document: Value = serde_json::from_slice(body)?;

    let envelope = document
        .as_object()
        .ok_or_else(|| ReqResError::Decode("payload is not a JSON object".to_string()))?;

    let page = count(envelope, "page")?;
    let per_page = count(envelope, "per_page")?;
    let total = count(envelope, "total")?;
    let total_pages = count(envelope, "total_pages")?;

    let raw_users = match envelope.get("data") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => {
            return Err(ReqResError::Decode("missing key 'data'".to_string()));
        }
        Some(_) => return Err(ReqResError::Decode("'data' is not an array".to_string())),
    };

    let users: Vec<User> = raw_users.iter().filter_map(map_user).collect();

    let rejected = raw_users.len() - users.len();
    if rejected > 0 {
        debug!(
            "Dropped {} of {} malformed user records on page {}",
            rejected,
            raw_users.len(),
            page
        );
    }

    Ok(Page::new(page, per_page, total, total_pages, users))
}

fn count(envelope: &Map<String, Value>, key: &str) -> ReqResResult<u64> {
    let value = match envelope.get(key) {
        Some(Value::Null) | None => {
            return Err(ReqResError::Decode(format!("missing key '{}'", key)));
        }
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        ReqResError::Decode(format!("'{}' is not a non-negative integer: {}", key, value))
    })
}
