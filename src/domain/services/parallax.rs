//! Parallax math - maps a scroll position onto an image-stack translation
//!
//! The about section pins its image stack while the page scrolls through the
//! section; the stack slides up by exactly its overflow over that distance.

use crate::domain::value_objects::css;

/// Scroll range over which a section scrubs its content
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubRange {
    pub start: f32,
    pub end: f32,
}

impl ScrubRange {
    /// Range for a section at `section_top` with `section_height`, seen through
    /// a viewport of `viewport_height`
    pub fn for_section(section_top: f32, section_height: f32, viewport_height: f32) -> Self {
        Self {
            start: section_top,
            end: section_top + section_height - viewport_height,
        }
    }

    /// 0.0 at the start, 1.0 at the end, `None` outside the range
    ///
    /// A range with no length (section no taller than the viewport) never
    /// yields progress.
    pub fn progress(&self, scroll_y: f32) -> Option<f32> {
        if self.end <= self.start {
            return None;
        }
        if scroll_y < self.start || scroll_y > self.end {
            return None;
        }
        Some((scroll_y - self.start) / (self.end - self.start))
    }
}

/// Translation for a stack of `stack_scroll_height` at `progress`
pub fn stack_offset(progress: f32, stack_scroll_height: f32, viewport_height: f32) -> f32 {
    let max_translate = stack_scroll_height - viewport_height;
    -(progress * max_translate)
}

/// `translateY` for the image stack, or `None` when this scroll event should
/// leave the transform alone
pub fn scrub_transform(
    range: ScrubRange,
    scroll_y: f32,
    stack_scroll_height: f32,
    viewport_height: f32,
) -> Option<String> {
    let progress = range.progress(scroll_y)?;
    Some(css::translate_y(stack_offset(
        progress,
        stack_scroll_height,
        viewport_height,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_endpoints() {
        let range = ScrubRange::for_section(1000.0, 2000.0, 800.0);
        assert_eq!(range.end, 2200.0);

        assert_eq!(range.progress(1000.0), Some(0.0));
        assert_eq!(range.progress(2200.0), Some(1.0));
        assert_eq!(range.progress(1600.0), Some(0.5));
    }

    #[test]
    fn test_outside_range_is_no_update() {
        let range = ScrubRange::for_section(1000.0, 2000.0, 800.0);
        assert_eq!(range.progress(500.0), None);
        assert_eq!(range.progress(2200.5), None);
        assert_eq!(scrub_transform(range, 500.0, 2400.0, 800.0), None);
    }

    #[test]
    fn test_zero_length_range_guarded() {
        // Section exactly one viewport tall: start == end
        let range = ScrubRange::for_section(1000.0, 800.0, 800.0);
        assert_eq!(range.progress(1000.0), None);

        // Shorter than the viewport: end < start
        let range = ScrubRange::for_section(1000.0, 500.0, 800.0);
        assert_eq!(range.progress(1000.0), None);
    }

    #[test]
    fn test_transform_values() {
        let range = ScrubRange::for_section(1000.0, 2000.0, 800.0);
        assert_eq!(
            scrub_transform(range, 1000.0, 2400.0, 800.0).as_deref(),
            Some("translateY(0px)")
        );
        assert_eq!(
            scrub_transform(range, 2200.0, 2400.0, 800.0).as_deref(),
            Some("translateY(-1600px)")
        );
        assert_eq!(
            scrub_transform(range, 1600.0, 2400.0, 800.0).as_deref(),
            Some("translateY(-800px)")
        );
    }
}
