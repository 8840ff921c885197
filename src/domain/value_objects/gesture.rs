//! Gesture value objects - touch points, swipes and navigation keys

use crate::domain::entities::rotator::Direction;

/// Screen coordinate of a touch
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Classify a touch from `start` to `end` as a horizontal swipe
///
/// Only horizontal movement counts, so a vertical page scroll never flips
/// slides. A swipe to the left moves forward.
pub fn classify_swipe(start: Point, end: Point, threshold_px: f32) -> Option<Direction> {
    let horizontal = (end.x - start.x).abs();
    let vertical = (end.y - start.y).abs();

    if horizontal <= vertical {
        return None;
    }

    if end.x < start.x - threshold_px {
        Some(Direction::Forward)
    } else if end.x > start.x + threshold_px {
        Some(Direction::Backward)
    } else {
        None
    }
}

/// Remembers where the current touch began
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start: Option<Point>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// Finish the touch; a touch that never began classifies as nothing
    pub fn finish(&mut self, point: Point, threshold_px: f32) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, point, threshold_px)
    }
}

/// Keyboard keys the page reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }

    /// Slide direction for arrow keys
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::ArrowLeft => Some(Direction::Backward),
            Key::ArrowRight => Some(Direction::Forward),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_directions() {
        let start = Point::new(300.0, 100.0);
        assert_eq!(
            classify_swipe(start, Point::new(200.0, 110.0), 50.0),
            Some(Direction::Forward)
        );
        assert_eq!(
            classify_swipe(start, Point::new(400.0, 90.0), 50.0),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn test_swipe_threshold_and_vertical_rejection() {
        let start = Point::new(300.0, 100.0);
        // Exactly at the threshold is not a swipe
        assert_eq!(classify_swipe(start, Point::new(250.0, 100.0), 50.0), None);
        // Mostly vertical: page scroll
        assert_eq!(classify_swipe(start, Point::new(200.0, 300.0), 50.0), None);
    }

    #[test]
    fn test_tracker_requires_begin() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.finish(Point::new(0.0, 0.0), 50.0), None);

        tracker.begin(Point::new(300.0, 0.0));
        assert_eq!(tracker.finish(Point::new(100.0, 0.0), 50.0), Some(Direction::Forward));
        // Consumed
        assert_eq!(tracker.finish(Point::new(100.0, 0.0), 50.0), None);
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_dom("ArrowLeft").direction(), Some(Direction::Backward));
        assert_eq!(Key::from_dom("ArrowRight").direction(), Some(Direction::Forward));
        assert_eq!(Key::from_dom("a"), Key::Other("a".to_string()));
        assert_eq!(Key::from_dom("a").direction(), None);
    }
}
