//! Vitrine - interaction layer for a storefront landing page
//!
//! The widgets (hero slider, campaign carousel, product grids, navigation
//! drawer and the small page helpers) are written against ports, so the
//! same code runs in the browser (feature `web`) and headless in tests.
//!
//! Layers follow the usual clean architecture split:
//! - [`domain`]: rotation state machines, product tables, page geometry
//! - [`application`]: ports and the rotation/timer services
//! - [`widget`]: the page widgets
//! - [`adapters`]: the event table and the page controller
//! - [`infrastructure`]: document/scheduler implementations and hosts
//! - [`shared`]: configuration and catalog loading

// Include the log module first so the log! macro works everywhere
#[macro_use]
pub mod log;

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod widget;
