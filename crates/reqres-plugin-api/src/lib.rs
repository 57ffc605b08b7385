//! # ReqRes Plugin API
//!
//! Extension surface of the user listing pipeline.
//!
//! Plugins observe the list of users before it is finalized and may filter,
//! add, remove, or replace entries. A plugin contributes one or more
//! prioritised observers through [`UserListSubscriber`]; higher priorities run
//! first and equal priorities run in registration order.

pub mod context;
pub mod event;
pub mod observer;

pub use context::*;
pub use event::*;
pub use observer::*;

use serde::{Deserialize, Serialize};

/// Plugin descriptor containing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique plugin key.
    pub key: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version (semver).
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Plugin author.
    pub author: String,
}

/// Plugin trait that all plugins must implement.
pub trait Plugin: Send + Sync {
    /// Returns the plugin descriptor.
    fn descriptor(&self) -> &PluginDescriptor;
}
