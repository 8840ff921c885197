//! TimerService - per-widget timer bookkeeping
//!
//! Each widget owns its timers through slots. A slot holds at most one live
//! handle: arming it again cancels the previous handle first, so a widget can
//! never end up with two loops advancing it. Fired handles that a slot no
//! longer owns are rejected.

use crate::application::ports::{FrameHandle, SchedulerPort, TimerHandle};

/// Whether a slot repeats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires every `delay_ms` until cancelled
    Interval,
    /// Fires once
    Timeout,
}

/// One timer owned by one widget
#[derive(Debug)]
pub struct TimerSlot {
    kind: TimerKind,
    delay_ms: u32,
    handle: Option<TimerHandle>,
}

impl TimerSlot {
    /// A repeating slot
    pub fn interval(interval_ms: u32) -> Self {
        Self {
            kind: TimerKind::Interval,
            delay_ms: interval_ms,
            handle: None,
        }
    }

    /// A one-shot slot
    pub fn timeout(delay_ms: u32) -> Self {
        Self {
            kind: TimerKind::Timeout,
            delay_ms,
            handle: None,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Cancel any live timer, then schedule a fresh full-length one
    pub fn restart(&mut self, scheduler: &mut dyn SchedulerPort) -> TimerHandle {
        self.cancel(scheduler);
        let handle = match self.kind {
            TimerKind::Interval => scheduler.set_interval(self.delay_ms),
            TimerKind::Timeout => scheduler.set_timeout(self.delay_ms),
        };
        self.handle = Some(handle);
        handle
    }

    /// Cancel the live timer, if any
    pub fn cancel(&mut self, scheduler: &mut dyn SchedulerPort) {
        if let Some(handle) = self.handle.take() {
            scheduler.clear_timer(handle);
        }
    }

    /// Check if a timer is currently live
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether `handle` is this slot's live timer
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.handle == Some(handle)
    }

    /// Accept a fired handle. One-shot slots are spent afterwards.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if !self.owns(handle) {
            return false;
        }
        if self.kind == TimerKind::Timeout {
            self.handle = None;
        }
        true
    }
}

/// One animation-frame request owned by one widget
#[derive(Debug, Default)]
pub struct FrameSlot {
    handle: Option<FrameHandle>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any outstanding request. A refused
    /// request leaves the slot empty.
    pub fn request(&mut self, scheduler: &mut dyn SchedulerPort) -> Option<FrameHandle> {
        self.cancel(scheduler);
        self.handle = scheduler.request_frame();
        self.handle
    }

    pub fn cancel(&mut self, scheduler: &mut dyn SchedulerPort) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel_frame(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Accept a delivered frame. A matching request is spent.
    pub fn fire(&mut self, handle: FrameHandle) -> bool {
        if self.handle == Some(handle) {
            self.handle = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::manual_scheduler::ManualScheduler;

    #[test]
    fn test_restart_cancels_previous() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = TimerSlot::interval(1000);

        let first = slot.restart(&mut scheduler);
        let second = slot.restart(&mut scheduler);

        assert_ne!(first, second);
        assert_eq!(scheduler.active_timers(), 1);
        assert!(!slot.owns(first));
        assert!(slot.owns(second));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = TimerSlot::interval(1000);
        slot.cancel(&mut scheduler);

        slot.restart(&mut scheduler);
        slot.cancel(&mut scheduler);
        slot.cancel(&mut scheduler);

        assert!(!slot.is_active());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_timeout_is_spent_after_firing() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = TimerSlot::timeout(300);
        let handle = slot.restart(&mut scheduler);

        assert_eq!(scheduler.advance(300), vec![handle]);
        assert!(slot.fire(handle));
        assert!(!slot.is_active());
        assert!(!slot.fire(handle));
    }

    #[test]
    fn test_interval_stays_armed() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = TimerSlot::interval(100);
        let handle = slot.restart(&mut scheduler);

        assert_eq!(scheduler.advance(250), vec![handle, handle]);
        assert!(slot.fire(handle));
        assert!(slot.fire(handle));
        assert!(slot.is_active());
    }

    #[test]
    fn test_frame_slot_single_request() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = FrameSlot::new();

        let stale = slot.request(&mut scheduler).unwrap();
        let live = slot.request(&mut scheduler).unwrap();

        assert_eq!(scheduler.take_frames(), vec![live]);
        assert!(!slot.fire(stale));
        assert!(slot.fire(live));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_refused_frame_leaves_slot_empty() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = FrameSlot::new();
        scheduler.refuse_frames(true);

        assert_eq!(slot.request(&mut scheduler), None);
        assert!(!slot.is_pending());

        scheduler.refuse_frames(false);
        let handle = slot.request(&mut scheduler).unwrap();
        assert!(slot.is_pending());
        assert_eq!(scheduler.take_frames(), vec![handle]);
    }
}
