//! ReadMoreLinks - in-page anchors that smooth-scroll to their section

use crate::application::ports::{NodeId, ScrollBehavior};
use crate::domain::value_objects::Selector;
use crate::shared::config::Selectors;
use crate::widget::Surface;

#[derive(Debug)]
pub struct ReadMoreLinks {
    links: Vec<NodeId>,
}

impl ReadMoreLinks {
    pub fn mount(cx: &mut Surface, selectors: &Selectors) -> Option<Self> {
        let links = cx.document.query_all(&selectors.read_more);
        if links.is_empty() {
            return None;
        }
        Some(Self { links })
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Scroll to the link's target section. Returns whether a scroll was
    /// requested; the browser's own navigation is cancelled either way.
    pub fn on_click(&self, cx: &mut Surface, link: NodeId) -> bool {
        let Some(href) = cx.document.attribute(link, "href") else {
            return false;
        };
        if href.is_empty() || href == "#" {
            return false;
        }
        let selector = match Selector::parse(&href) {
            Ok(selector) => selector,
            Err(e) => {
                log!("ReadMoreLinks: ignoring href '{}': {}", href, e);
                return false;
            }
        };
        let Some(target) = cx.document.query(&selector) else {
            log!("ReadMoreLinks: nothing matches '{}'", href);
            return false;
        };
        let top = cx.document.metrics(target).offset_top;
        cx.document.scroll_to(top, ScrollBehavior::Smooth);
        true
    }
}
