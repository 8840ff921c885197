//! Rotator entity - the index arithmetic behind every slideshow
//!
//! A rotator walks an ordered set of `item_count` items and always wraps,
//! in both directions. Timers live one layer up; see
//! [`DiscreteRotation`](crate::application::services::DiscreteRotation).

use crate::domain::errors::DomainError;

/// Which way a rotator moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Next item (timer tick, right arrow, left swipe, "next" button)
    Forward,
    /// Previous item (left arrow, right swipe, "prev" button)
    Backward,
}

impl Direction {
    /// Signed step, +1 or -1
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Current position within a fixed, non-empty item set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotator {
    item_count: usize,
    current: usize,
}

impl Rotator {
    /// Create a rotator positioned on the first item
    pub fn new(item_count: usize) -> Result<Self, DomainError> {
        if item_count == 0 {
            return Err(DomainError::EmptyRotator);
        }
        Ok(Self {
            item_count,
            current: 0,
        })
    }

    /// Number of items in the set
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Index of the active item
    pub fn current(&self) -> usize {
        self.current
    }

    /// Move one step, wrapping at both ends. Returns the new index.
    pub fn advance(&mut self, direction: Direction) -> usize {
        self.current = self.offset(direction);
        self.current
    }

    /// Set the index directly; out-of-range input wraps instead of failing
    pub fn jump_to(&mut self, index: usize) -> usize {
        self.current = index % self.item_count;
        self.current
    }

    /// Index the next forward step would land on
    pub fn peek_next(&self) -> usize {
        self.offset(Direction::Forward)
    }

    fn offset(&self, direction: Direction) -> usize {
        match direction {
            Direction::Forward => (self.current + 1) % self.item_count,
            Direction::Backward => (self.current + self.item_count - 1) % self.item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rotator_rejected() {
        assert_eq!(Rotator::new(0), Err(DomainError::EmptyRotator));
    }

    #[test]
    fn test_forward_cycle_returns_to_start() {
        for count in 1..=12 {
            let mut rotator = Rotator::new(count).unwrap();
            for step in 1..=count {
                let index = rotator.advance(Direction::Forward);
                assert!(index < count);
                if step < count {
                    assert_eq!(index, step);
                }
            }
            assert_eq!(rotator.current(), 0, "count {}", count);
        }
    }

    #[test]
    fn test_backward_wraps_to_last() {
        let mut rotator = Rotator::new(5).unwrap();
        assert_eq!(rotator.advance(Direction::Backward), 4);
        assert_eq!(rotator.advance(Direction::Backward), 3);

        let mut single = Rotator::new(1).unwrap();
        assert_eq!(single.advance(Direction::Backward), 0);
    }

    #[test]
    fn test_jump_to_wraps_out_of_range() {
        let mut rotator = Rotator::new(4).unwrap();
        assert_eq!(rotator.jump_to(2), 2);
        assert_eq!(rotator.jump_to(9), 1);
        assert_eq!(rotator.peek_next(), 2);
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Forward.step(), 1);
        assert_eq!(Direction::Backward.step(), -1);
    }
}
