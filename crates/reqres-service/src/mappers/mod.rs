//! Mapping of untrusted upstream payloads into domain records.
//!
//! [`map_user`] accepts or rejects a single raw record; [`decode_user_page`]
//! validates the payload envelope and keeps every record that maps.

mod record_mapper;
mod response_validator;

pub use record_mapper::*;
pub use response_validator::*;
