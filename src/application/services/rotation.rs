//! Rotation engine - timers wrapped around the rotator state machines
//!
//! [`DiscreteRotation`] steps an index on an interval (hero slider, mobile
//! campaign slideshow). [`ContinuousRotation`] moves a marquee every
//! animation frame (desktop campaign). Neither renders; the owning widget
//! paints whatever index or offset comes back.

use crate::application::ports::{FrameHandle, SchedulerPort, TimerHandle};
use crate::application::services::timer_service::{FrameSlot, TimerSlot};
use crate::domain::entities::{Direction, Marquee, Rotator};
use crate::domain::errors::DomainError;

/// Interval-driven rotator
#[derive(Debug)]
pub struct DiscreteRotation {
    rotator: Rotator,
    timer: TimerSlot,
    paused: bool,
}

impl DiscreteRotation {
    /// Create a stopped rotation over `item_count` items
    pub fn new(item_count: usize, interval_ms: u32) -> Result<Self, DomainError> {
        if interval_ms == 0 {
            return Err(DomainError::ValidationError(
                "rotation interval must be positive".to_string(),
            ));
        }
        Ok(Self {
            rotator: Rotator::new(item_count)?,
            timer: TimerSlot::interval(interval_ms),
            paused: false,
        })
    }

    pub fn current(&self) -> usize {
        self.rotator.current()
    }

    pub fn item_count(&self) -> usize {
        self.rotator.item_count()
    }

    /// Index the next automatic step will show
    pub fn peek_next(&self) -> usize {
        self.rotator.peek_next()
    }

    pub fn interval_ms(&self) -> u32 {
        self.timer.delay_ms()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether an automatic advance is scheduled
    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Cancel any existing timer and schedule a fresh full interval
    pub fn start(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.paused = false;
        self.timer.restart(scheduler);
    }

    /// Stop advancing; the index stays where it is
    pub fn pause(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.paused = true;
        self.timer.cancel(scheduler);
    }

    /// Start again with a full interval, not the remainder of the old one
    pub fn resume(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.start(scheduler);
    }

    /// Manual step. Resets the countdown unless paused.
    pub fn advance(&mut self, direction: Direction, scheduler: &mut dyn SchedulerPort) -> usize {
        let index = self.rotator.advance(direction);
        self.reschedule(scheduler);
        index
    }

    /// Manual jump. Resets the countdown unless paused.
    pub fn jump_to(&mut self, index: usize, scheduler: &mut dyn SchedulerPort) -> usize {
        let index = self.rotator.jump_to(index);
        self.reschedule(scheduler);
        index
    }

    /// Handle a fired timer. Returns the new index if the timer was ours.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<usize> {
        if self.paused || !self.timer.fire(handle) {
            return None;
        }
        Some(self.rotator.advance(Direction::Forward))
    }

    /// Cancel everything; the rotation can be started again later
    pub fn dispose(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.timer.cancel(scheduler);
    }

    /// Stop, clear the pause and go back to the first item
    pub fn reset(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.timer.cancel(scheduler);
        self.paused = false;
        self.rotator.jump_to(0);
    }

    fn reschedule(&mut self, scheduler: &mut dyn SchedulerPort) {
        if !self.paused {
            self.timer.restart(scheduler);
        }
    }
}

/// Frame-driven marquee
#[derive(Debug)]
pub struct ContinuousRotation {
    marquee: Marquee,
    frame: FrameSlot,
    paused: bool,
}

impl ContinuousRotation {
    pub fn new(marquee: Marquee) -> Self {
        Self {
            marquee,
            frame: FrameSlot::new(),
            paused: false,
        }
    }

    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    pub fn offset(&self) -> f32 {
        self.marquee.offset()
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_pending()
    }

    /// Begin (or continue) animating from the current offset
    pub fn start(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.paused = false;
        self.request_frame(scheduler);
    }

    pub fn pause(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.paused = true;
        self.frame.cancel(scheduler);
    }

    pub fn resume(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.start(scheduler);
    }

    /// Manual jump by one item; rendered on the next frame. A loop that
    /// stalled on a refused frame request is restarted.
    pub fn jump(&mut self, direction: Direction, scheduler: &mut dyn SchedulerPort) {
        self.marquee.nudge(direction);
        if !self.paused && !self.frame.is_pending() {
            self.request_frame(scheduler);
        }
    }

    /// Handle a delivered frame: tick, ask for the next one, return the
    /// offset to render
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut dyn SchedulerPort) -> Option<f32> {
        if self.paused || !self.frame.fire(handle) {
            return None;
        }
        let offset = self.marquee.tick();
        self.request_frame(scheduler);
        Some(offset)
    }

    pub fn dispose(&mut self, scheduler: &mut dyn SchedulerPort) {
        self.frame.cancel(scheduler);
        self.marquee.reset();
    }

    fn request_frame(&mut self, scheduler: &mut dyn SchedulerPort) {
        if self.frame.request(scheduler).is_none() {
            log!("ContinuousRotation: frame refused, marquee stalled at {}", self.marquee.offset());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::manual_scheduler::ManualScheduler;

    fn fire_all(rotation: &mut DiscreteRotation, fired: Vec<TimerHandle>) -> Vec<usize> {
        fired.into_iter().filter_map(|h| rotation.on_timer(h)).collect()
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(DiscreteRotation::new(3, 0).is_err());
        assert_eq!(
            DiscreteRotation::new(0, 100).unwrap_err(),
            DomainError::EmptyRotator
        );
    }

    #[test]
    fn test_double_start_fires_once_per_tick() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = DiscreteRotation::new(5, 6000).unwrap();

        rotation.start(&mut scheduler);
        rotation.start(&mut scheduler);
        assert_eq!(scheduler.active_timers(), 1);

        let fired = scheduler.advance(6000);
        assert_eq!(fired.len(), 1);
        assert_eq!(fire_all(&mut rotation, fired), vec![1]);

        let fired = scheduler.advance(6000);
        assert_eq!(fire_all(&mut rotation, fired), vec![2]);
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = DiscreteRotation::new(5, 1000).unwrap();

        rotation.start(&mut scheduler);
        let stale = scheduler.advance(1000);
        rotation.start(&mut scheduler);

        // A host that delivers the cancelled handle late cannot advance us.
        assert_eq!(fire_all(&mut rotation, stale), Vec::<usize>::new());
        assert_eq!(rotation.current(), 0);
    }

    #[test]
    fn test_manual_step_resets_countdown() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = DiscreteRotation::new(5, 6000).unwrap();
        rotation.start(&mut scheduler);

        assert!(scheduler.advance(4000).is_empty());
        assert_eq!(rotation.jump_to(3, &mut scheduler), 3);

        // The old deadline at 6000 is gone
        assert!(scheduler.advance(5999).is_empty());
        let fired = scheduler.advance(1);
        assert_eq!(fire_all(&mut rotation, fired), vec![4]);
    }

    #[test]
    fn test_pause_keeps_index_and_resume_uses_full_interval() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = DiscreteRotation::new(3, 6000).unwrap();
        rotation.start(&mut scheduler);

        scheduler.advance(5000);
        rotation.pause(&mut scheduler);
        assert!(rotation.is_paused());
        assert_eq!(scheduler.active_timers(), 0);
        assert!(scheduler.advance(10_000).is_empty());
        assert_eq!(rotation.current(), 0);

        rotation.resume(&mut scheduler);
        assert!(scheduler.advance(5999).is_empty());
        let fired = scheduler.advance(1);
        assert_eq!(fire_all(&mut rotation, fired), vec![1]);
    }

    #[test]
    fn test_manual_step_while_paused_stays_paused() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = DiscreteRotation::new(4, 1000).unwrap();
        rotation.start(&mut scheduler);
        rotation.pause(&mut scheduler);

        assert_eq!(rotation.advance(Direction::Backward, &mut scheduler), 3);
        assert!(!rotation.is_running());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_continuous_rotation_frames() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = ContinuousRotation::new(Marquee::new(4, 470.0, 0.5).unwrap());
        rotation.start(&mut scheduler);
        rotation.start(&mut scheduler);

        let frames = scheduler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(rotation.on_frame(frames[0], &mut scheduler), Some(-0.5));
        // Stale delivery of the same frame does nothing
        assert_eq!(rotation.on_frame(frames[0], &mut scheduler), None);

        rotation.jump(Direction::Forward, &mut scheduler);
        let frames = scheduler.take_frames();
        assert_eq!(rotation.on_frame(frames[0], &mut scheduler), Some(-471.0));

        rotation.pause(&mut scheduler);
        assert_eq!(scheduler.pending_frames(), 0);
        rotation.dispose(&mut scheduler);
        assert_eq!(rotation.offset(), 0.0);
    }

    #[test]
    fn test_refused_frame_stalls_until_next_jump() {
        let mut scheduler = ManualScheduler::new();
        let mut rotation = ContinuousRotation::new(Marquee::new(4, 470.0, 0.5).unwrap());
        rotation.start(&mut scheduler);

        scheduler.refuse_frames(true);
        let frames = scheduler.take_frames();
        assert_eq!(rotation.on_frame(frames[0], &mut scheduler), Some(-0.5));
        assert!(!rotation.is_running());

        // A jump while stalled asks for a frame again
        scheduler.refuse_frames(false);
        rotation.jump(Direction::Forward, &mut scheduler);
        assert!(rotation.is_running());
        let frames = scheduler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(rotation.on_frame(frames[0], &mut scheduler), Some(-471.0));

        // A jump while running does not stack a second request
        rotation.jump(Direction::Forward, &mut scheduler);
        assert_eq!(scheduler.pending_frames(), 1);
    }
}
