//! Adapters Layer - the page-facing edge of the crate
//!
//! Controllers turn host events into widget calls through the event table.

pub mod controllers;
