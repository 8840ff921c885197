//! Application Layer - ports and coordination services
//!
//! This layer sits between the domain state machines and the host.
//! It contains:
//! - **Ports**: Interfaces for the document, the scheduler and image loading
//! - **Services**: Timer ownership and the rotation engine
//!
//! # Clean Architecture Rules
//! - Depends only on the domain layer
//! - Defines ports that infrastructure implements
//! - Contains no browser-specific code

pub mod ports;
pub mod services;

// Re-export commonly used types
pub use ports::*;
pub use services::*;
