//! # ReqRes Service
//!
//! Service layer of the ReqRes user listing service.
//!
//! A listing request is answered from the result cache when possible;
//! otherwise the upstream directory is fetched, the raw payload is validated
//! and mapped into [`reqres_core::User`] records, registered observers revise
//! the list, and the outcome is cached.

pub mod cache;
pub mod dto;
pub mod mappers;
pub mod pipeline;
pub mod source;
pub mod user_list_service;

pub use cache::*;
pub use dto::*;
pub use pipeline::*;
pub use source::*;
pub use user_list_service::*;
