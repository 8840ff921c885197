//! Application Services - timer bookkeeping and the rotation engine
//!
//! These services coordinate domain state machines with the scheduler port.

pub mod rotation;
pub mod timer_service;

pub use rotation::{ContinuousRotation, DiscreteRotation};
pub use timer_service::{FrameSlot, TimerKind, TimerSlot};
