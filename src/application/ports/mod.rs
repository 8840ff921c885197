//! Application Ports - interfaces the widgets drive
//!
//! - [`DocumentPort`]: the presentation tree
//! - [`SchedulerPort`]: intervals, timeouts and animation frames
//! - [`ImagePort`]: image prefetch

pub mod document_port;
pub mod image_port;
pub mod scheduler_port;

pub use document_port::{BoxMetrics, DocumentPort, NodeId, ScrollBehavior};
pub use image_port::{ImagePort, PrefetchLog};
pub use scheduler_port::{FrameHandle, SchedulerPort, TimerHandle};
