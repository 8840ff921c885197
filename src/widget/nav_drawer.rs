//! NavDrawer - the mobile navigation menu
//!
//! Open while the toggle and menu carry `active`; the page body does not
//! scroll while it is open.

use crate::application::ports::NodeId;
use crate::domain::value_objects::ViewportClass;
use crate::shared::config::Selectors;
use crate::widget::{Surface, ACTIVE_CLASS};

#[derive(Debug)]
pub struct NavDrawer {
    toggle: NodeId,
    menu: NodeId,
    links: Vec<NodeId>,
    was_desktop: bool,
}

impl NavDrawer {
    pub fn mount(cx: &mut Surface, selectors: &Selectors, viewport: ViewportClass) -> Option<Self> {
        let toggle = cx.document.query(&selectors.nav_toggle);
        let menu = cx.document.query(&selectors.nav_menu);
        let (Some(toggle), Some(menu)) = (toggle, menu) else {
            log!("NavDrawer: toggle or menu missing, skipping");
            return None;
        };
        Some(Self {
            toggle,
            menu,
            links: cx.document.query_all(&selectors.nav_links),
            was_desktop: !viewport.is_mobile,
        })
    }

    pub fn toggle(&self) -> NodeId {
        self.toggle
    }

    pub fn menu(&self) -> NodeId {
        self.menu
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn is_open(&self, cx: &Surface) -> bool {
        cx.document.has_class(self.menu, ACTIVE_CLASS)
    }

    /// Toggle click
    pub fn on_toggle(&mut self, cx: &mut Surface) {
        cx.document.toggle_class(self.toggle, ACTIVE_CLASS);
        let open = cx.document.toggle_class(self.menu, ACTIVE_CLASS);
        self.lock_scroll(cx, open);
    }

    /// Menu link click
    pub fn on_link_click(&mut self, cx: &mut Surface) {
        self.close(cx);
    }

    /// Any click on the page; `path` is the target followed by its ancestors
    pub fn on_document_click(&mut self, cx: &mut Surface, path: &[NodeId]) -> bool {
        if !self.is_open(cx) || path.iter().any(|n| *n == self.menu || *n == self.toggle) {
            return false;
        }
        self.close(cx);
        true
    }

    /// Growing past mobile width closes the drawer
    pub fn on_resize(&mut self, cx: &mut Surface, viewport: ViewportClass) -> bool {
        let is_desktop = !viewport.is_mobile;
        let crossed = is_desktop && !self.was_desktop;
        self.was_desktop = is_desktop;
        if crossed {
            self.close(cx);
        }
        crossed
    }

    fn close(&mut self, cx: &mut Surface) {
        cx.document.set_class(self.toggle, ACTIVE_CLASS, false);
        cx.document.set_class(self.menu, ACTIVE_CLASS, false);
        self.lock_scroll(cx, false);
    }

    fn lock_scroll(&self, cx: &mut Surface, locked: bool) {
        if let Some(body) = cx.document.body() {
            cx.document.set_style(body, "overflow", if locked { "hidden" } else { "" });
        }
    }
}
