//! Domain Services - pure computations over domain values

pub mod parallax;

pub use parallax::{scrub_transform, stack_offset, ScrubRange};
