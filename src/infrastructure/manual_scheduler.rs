//! ManualScheduler - virtual clock implementation of SchedulerPort
//!
//! Time only moves when the caller advances it. Due timers come out in
//! deadline order (ties broken by creation order), intervals are re-armed
//! one period after their deadline, and frame requests queue until taken.

use std::collections::BTreeMap;

use crate::application::ports::{FrameHandle, SchedulerPort, TimerHandle};

#[derive(Clone, Copy, Debug)]
struct ScheduledTimer {
    due_ms: u64,
    period_ms: Option<u32>,
}

/// Deterministic scheduler for tests and headless hosts
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<u64, ScheduledTimer>,
    frames: Vec<FrameHandle>,
    refuse_frames: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed since creation
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live intervals and timeouts
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of outstanding frame requests
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }

    /// Pop the earliest timer due at or before `deadline_ms`, moving the
    /// clock to its due time. Intervals are re-armed, timeouts removed.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<TimerHandle> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= deadline_ms)
            .min_by_key(|(id, t)| (t.due_ms, **id))
            .map(|(id, t)| (*id, *t))?;

        self.now_ms = self.now_ms.max(timer.due_ms);
        match timer.period_ms {
            Some(period) => {
                let next = timer.due_ms + u64::from(period.max(1));
                if let Some(entry) = self.timers.get_mut(&id) {
                    entry.due_ms = next;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(TimerHandle(id))
    }

    /// Move the clock forward by `ms`, returning every firing in order
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        let deadline = self.now_ms + ms;
        let mut fired = Vec::new();
        while let Some(handle) = self.pop_due(deadline) {
            fired.push(handle);
        }
        self.settle(deadline);
        fired
    }

    /// Move the clock to `now_ms` without firing anything; never goes back
    pub fn settle(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Make `request_frame` fail, as a host without a repaint loop would
    pub fn refuse_frames(&mut self, refuse: bool) {
        self.refuse_frames = refuse;
    }

    /// Drain outstanding frame requests, oldest first
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.frames)
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn schedule(&mut self, delay_ms: u32, period_ms: Option<u32>) -> TimerHandle {
        let id = self.allocate();
        let due_ms = self.now_ms + u64::from(delay_ms.max(1));
        self.timers.insert(id, ScheduledTimer { due_ms, period_ms });
        TimerHandle(id)
    }
}

impl SchedulerPort for ManualScheduler {
    fn set_interval(&mut self, interval_ms: u32) -> TimerHandle {
        self.schedule(interval_ms, Some(interval_ms))
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
        self.schedule(delay_ms, None)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle.0);
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.refuse_frames {
            return None;
        }
        let handle = FrameHandle(self.allocate());
        self.frames.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|f| *f != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let slow = scheduler.set_timeout(300);
        let fast = scheduler.set_interval(100);

        // At 300 both are due; the older timer goes first
        let fired = scheduler.advance(300);
        assert_eq!(fired, vec![fast, fast, slow, fast]);
        assert_eq!(scheduler.now_ms(), 300);
        assert!(!scheduler.is_active(slow));
        assert!(scheduler.is_active(fast));
    }

    #[test]
    fn test_clear_stops_interval() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.set_interval(50);
        assert_eq!(scheduler.advance(50), vec![handle]);

        scheduler.clear_timer(handle);
        scheduler.clear_timer(handle);
        assert!(scheduler.advance(1000).is_empty());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_pop_due_moves_clock() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.set_timeout(250);

        assert_eq!(scheduler.pop_due(100), None);
        assert_eq!(scheduler.pop_due(1000), Some(handle));
        assert_eq!(scheduler.now_ms(), 250);
    }

    #[test]
    fn test_frames_queue_until_taken() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame().unwrap();
        let b = scheduler.request_frame().unwrap();
        scheduler.cancel_frame(a);

        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.take_frames(), vec![b]);
        assert!(scheduler.take_frames().is_empty());

        scheduler.refuse_frames(true);
        assert_eq!(scheduler.request_frame(), None);
        assert_eq!(scheduler.pending_frames(), 0);
    }
}
