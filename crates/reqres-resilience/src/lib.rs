//! # ReqRes Resilience
//!
//! Resilience patterns for the ReqRes user listing service.
//! Every call to the upstream directory is bounded by a timeout so that no
//! request can hang indefinitely.

pub mod timeout;

pub use timeout::*;
