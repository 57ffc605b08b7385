//! # ReqRes Core
//!
//! Core types, traits, and error definitions for the ReqRes user listing service.
//! This crate provides the foundational abstractions shared by the service,
//! plugin, and presentation layers.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
