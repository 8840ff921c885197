//! Infrastructure Layer - hosts and port implementations
//!
//! - [`MemoryDocument`] and [`ManualScheduler`]: an in-memory page and a
//!   virtual clock, used by tests and headless hosts
//! - [`HeadlessHost`]: wires them to a mounted storefront
//! - [`NodeRegistry`]: id bookkeeping for hosts with external elements
//! - `web` (feature `web`): the browser DOM, window timers and the
//!   `startStorefront` entry point

pub mod composition_root;
pub mod manual_scheduler;
pub mod memory_document;
pub mod node_registry;

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(feature = "web")]
pub mod web;

pub use composition_root::HeadlessHost;
pub use manual_scheduler::ManualScheduler;
pub use memory_document::{MemoryDocument, ScrollRequest};
pub use node_registry::NodeRegistry;
