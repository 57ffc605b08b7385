//! # ReqRes REST
//!
//! REST API layer using Axum for the ReqRes user listing service.
//! Provides the user listing endpoints, cache administration, health checks,
//! and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
