//! Result type aliases for the ReqRes service.

use crate::ReqResError;

/// A specialized `Result` type for ReqRes operations.
pub type ReqResResult<T> = Result<T, ReqResError>;
