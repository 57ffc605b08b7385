//! # ReqRes Server Library
//!
//! Wiring for the ReqRes user listing server: builds the cache backend,
//! upstream source, and observer pipeline from configuration, and serves the
//! REST router.

pub mod app;
pub mod startup;
