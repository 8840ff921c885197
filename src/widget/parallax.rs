//! ScrollScrub - scroll-linked translation of the about section's image stack

use crate::application::ports::NodeId;
use crate::domain::services::{scrub_transform, ScrubRange};
use crate::domain::value_objects::Viewport;
use crate::shared::config::Selectors;
use crate::widget::Surface;

#[derive(Debug)]
pub struct ScrollScrub {
    section: NodeId,
    stack: NodeId,
}

impl ScrollScrub {
    pub fn mount(cx: &mut Surface, selectors: &Selectors) -> Option<Self> {
        let section = cx.document.query(&selectors.about_section);
        let stack = cx.document.query(&selectors.about_images);
        match (section, stack) {
            (Some(section), Some(stack)) => Some(Self { section, stack }),
            _ => {
                log!("ScrollScrub: about section or image stack missing, skipping");
                None
            }
        }
    }

    /// Reposition the stack for `scroll_y`. Outside the section's scroll
    /// range the transform keeps its last value.
    pub fn on_scroll(&self, cx: &mut Surface, scroll_y: f32, viewport: Viewport) -> bool {
        let section = cx.document.metrics(self.section);
        let stack = cx.document.metrics(self.stack);
        let range = ScrubRange::for_section(section.offset_top, section.offset_height, viewport.height);

        match scrub_transform(range, scroll_y, stack.scroll_height, viewport.height) {
            Some(transform) => {
                cx.document.set_style(self.stack, "transform", &transform);
                true
            }
            None => false,
        }
    }
}
