//! Marquee entity - continuous translation loop for the desktop campaign track
//!
//! The track holds the campaign slides followed by at least one copy of them.
//! Scrolling left by one full set of slides puts the copy exactly where the
//! originals started, so snapping the offset back to zero is invisible.

use crate::domain::entities::rotator::Direction;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::css;

/// Offset state of an infinite marquee
#[derive(Clone, Debug, PartialEq)]
pub struct Marquee {
    /// Current translation in pixels, always in `(loop_reset_point, 0]` after a tick
    offset: f32,
    /// Width of one item including its gap
    step_px: f32,
    /// Distance moved per animation frame
    speed_px_per_frame: f32,
    /// Offset at which the first copy has fully scrolled off
    loop_reset_point: f32,
}

impl Marquee {
    /// Create a marquee over `item_count` items of `step_px` width each
    pub fn new(item_count: usize, step_px: f32, speed_px_per_frame: f32) -> Result<Self, DomainError> {
        if item_count == 0 {
            return Err(DomainError::EmptyRotator);
        }
        if step_px.is_nan() || step_px <= 0.0 {
            return Err(DomainError::InvalidMarquee(format!(
                "step must be positive, got {}",
                step_px
            )));
        }
        if speed_px_per_frame.is_nan() || speed_px_per_frame <= 0.0 {
            return Err(DomainError::InvalidMarquee(format!(
                "speed must be positive, got {}",
                speed_px_per_frame
            )));
        }

        Ok(Self {
            offset: 0.0,
            step_px,
            speed_px_per_frame,
            loop_reset_point: -(item_count as f32 * step_px),
        })
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn step_px(&self) -> f32 {
        self.step_px
    }

    pub fn loop_reset_point(&self) -> f32 {
        self.loop_reset_point
    }

    /// Advance one animation frame. Returns the offset to render.
    pub fn tick(&mut self) -> f32 {
        self.offset -= self.speed_px_per_frame;
        // `<=` rather than `==`: a manual jump can overshoot the reset point.
        if self.offset <= self.loop_reset_point {
            self.offset = 0.0;
        }
        self.offset
    }

    /// Jump one item instantly. Takes effect on the next rendered frame.
    pub fn nudge(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.offset -= self.step_px,
            Direction::Backward => {
                self.offset += self.step_px;
                if self.offset > 0.0 {
                    // Same picture one loop further along the duplicated track.
                    self.offset += self.loop_reset_point;
                }
            }
        }
    }

    /// Back to the start of the track
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// CSS transform for the current offset
    pub fn transform(&self) -> String {
        css::translate_x(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(Marquee::new(0, 470.0, 0.5), Err(DomainError::EmptyRotator));
        assert!(matches!(
            Marquee::new(4, 0.0, 0.5),
            Err(DomainError::InvalidMarquee(_))
        ));
        assert!(matches!(
            Marquee::new(4, 470.0, -1.0),
            Err(DomainError::InvalidMarquee(_))
        ));
        assert!(matches!(
            Marquee::new(4, 470.0, f32::NAN),
            Err(DomainError::InvalidMarquee(_))
        ));
    }

    #[test]
    fn test_snaps_to_zero_on_the_wrapping_frame() {
        let count = 4;
        let mut marquee = Marquee::new(count, 470.0, 0.5).unwrap();
        let reset = marquee.loop_reset_point();
        assert_eq!(reset, -1880.0);

        let mut previous = marquee.offset();
        let mut wrapped_at = None;
        for frame in 1..=5000 {
            let offset = marquee.tick();
            assert!(offset > reset, "frame {} rendered {}", frame, offset);
            if offset == 0.0 {
                // The frame before was the last one still inside the loop.
                assert_eq!(previous, reset + 0.5);
                wrapped_at = Some(frame);
                break;
            }
            previous = offset;
        }
        assert_eq!(wrapped_at, Some(3760));
    }

    #[test]
    fn test_manual_jump_is_single_discontinuity() {
        let mut marquee = Marquee::new(4, 470.0, 0.5).unwrap();
        let mut offsets = Vec::new();
        for _ in 0..10 {
            offsets.push(marquee.tick());
        }
        marquee.nudge(Direction::Forward);
        for _ in 0..10 {
            offsets.push(marquee.tick());
        }

        let mut jumps = 0;
        for pair in offsets.windows(2) {
            assert!(pair[1] < pair[0], "not decreasing: {:?}", pair);
            let delta = pair[0] - pair[1];
            if delta > 0.5 {
                assert_eq!(delta, 470.5);
                jumps += 1;
            }
        }
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_forward_overshoot_is_caught() {
        let mut marquee = Marquee::new(2, 470.0, 0.5).unwrap();
        marquee.nudge(Direction::Forward);
        marquee.nudge(Direction::Forward);
        assert_eq!(marquee.offset(), -940.0);
        // Past the reset point before the frame runs; the frame snaps it back.
        assert_eq!(marquee.tick(), 0.0);
    }

    #[test]
    fn test_backward_jump_stays_on_track() {
        let mut marquee = Marquee::new(4, 470.0, 0.5).unwrap();
        marquee.nudge(Direction::Backward);
        assert_eq!(marquee.offset(), -1410.0);

        marquee.nudge(Direction::Forward);
        marquee.nudge(Direction::Backward);
        assert_eq!(marquee.offset(), -1410.0);
    }

    #[test]
    fn test_transform() {
        let mut marquee = Marquee::new(4, 470.0, 0.5).unwrap();
        assert_eq!(marquee.transform(), "translateX(0px)");
        marquee.tick();
        assert_eq!(marquee.transform(), "translateX(-0.5px)");
    }
}
