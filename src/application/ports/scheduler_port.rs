//! SchedulerPort - timers and animation frames
//!
//! The port only hands out handles. When a timer or frame comes due, the host
//! delivers it back as a [`PageEvent`](crate::adapters::controllers::PageEvent)
//! carrying the same handle.

/// Handle to an interval or timeout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Handle to a pending animation frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Port interface for scheduling
pub trait SchedulerPort {
    /// Fire every `interval_ms` until cleared
    fn set_interval(&mut self, interval_ms: u32) -> TimerHandle;

    /// Fire once after `delay_ms`
    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle;

    /// Cancel an interval or timeout; unknown handles are ignored
    fn clear_timer(&mut self, handle: TimerHandle);

    /// Fire once before the next repaint; `None` if the host refused the
    /// request, in which case nothing will be delivered
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a frame request; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}
