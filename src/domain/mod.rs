//! Domain Layer - rotation state machines, product tables and page geometry
//!
//! Nothing in here touches a document, a clock or an image loader; those sit
//! behind the ports in the application layer.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::DomainError;
