//! Shared Utilities Module
//!
//! Configuration and catalog data used across layers.

pub mod catalog;
pub mod config;

pub use catalog::DEFAULT_RANKING_TAB;
pub use config::{ConfigError, SiteConfig};
