//! EventTable - the page's complete interaction surface as data
//!
//! Every listener the storefront would attach is a [`Binding`] row: which
//! event, on what, and which handler runs. The table is built once at mount,
//! can be listed for auditing, and routes an event along its propagation
//! path the way the browser would.

use crate::application::ports::NodeId;

/// Event types the page listens for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    KeyDown,
    TouchStart,
    TouchEnd,
    MouseEnter,
    MouseLeave,
    Submit,
    Scroll,
    Resize,
    VisibilityChange,
    Load,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Click,
        EventKind::KeyDown,
        EventKind::TouchStart,
        EventKind::TouchEnd,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::Submit,
        EventKind::Scroll,
        EventKind::Resize,
        EventKind::VisibilityChange,
        EventKind::Load,
    ];

    /// DOM event type name
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchEnd => "touchend",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Submit => "submit",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::VisibilityChange => "visibilitychange",
            EventKind::Load => "load",
        }
    }

    pub fn from_dom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.dom_name() == name)
    }

    /// Whether ancestors of the target see the event
    pub fn bubbles(self) -> bool {
        !matches!(self, EventKind::MouseEnter | EventKind::MouseLeave)
    }

    /// Events fired at the window itself rather than at an element
    pub fn is_window_event(self) -> bool {
        matches!(self, EventKind::Scroll | EventKind::Resize | EventKind::Load)
    }
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingTarget {
    Window,
    Document,
    Node(NodeId),
}

/// What runs when a binding matches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    NavToggle,
    NavLink,
    NavOutsideClick,
    NavResize,
    HeroTab,
    HeroMouseEnter,
    HeroMouseLeave,
    HeroTouchStart,
    HeroTouchEnd,
    HeroKeys,
    HeroVisibility,
    HeroPreload,
    CouponClose,
    ReadMore,
    CampaignPrev,
    CampaignNext,
    CampaignThumb,
    CampaignResize,
    CampaignVisibility,
    NewsletterSubmit,
    ScrollScrub,
    GridRender,
    RankingTab,
    RankingLoad,
}

/// One listener
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub kind: EventKind,
    pub target: BindingTarget,
    pub handler: Handler,
}

/// A binding selected for an event, with the propagation stage it runs in.
/// Stage 0 is the target, then each ancestor, then document, then window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Routed {
    pub binding: Binding,
    pub stage: usize,
    /// The node the binding is attached to, if any
    pub current: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct EventTable {
    bindings: Vec<Binding>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding; same-kind bindings run in the order added
    pub fn bind(&mut self, kind: EventKind, target: BindingTarget, handler: Handler) {
        self.bindings.push(Binding {
            kind,
            target,
            handler,
        });
    }

    /// Bind the same handler on several nodes
    pub fn bind_each(&mut self, kind: EventKind, nodes: &[NodeId], handler: Handler) {
        for node in nodes {
            self.bind(kind, BindingTarget::Node(*node), handler);
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Event kinds with at least one binding, for hosts that attach one
    /// listener per kind
    pub fn kinds(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self.bindings.iter().map(|b| b.kind).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    /// Bindings attached to `target`
    pub fn bindings_on(&self, target: BindingTarget) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(move |b| b.target == target)
    }

    /// Detach everything
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Bindings that see an event of `kind`, in the order they run.
    /// `path` is the target element followed by its ancestors.
    pub fn route(&self, kind: EventKind, path: &[NodeId]) -> Vec<Routed> {
        let mut routed = Vec::new();
        let mut stage = 0;

        if !kind.is_window_event() {
            let visible = if kind.bubbles() { path.len() } else { path.len().min(1) };
            for node in &path[..visible] {
                self.collect(kind, BindingTarget::Node(*node), stage, Some(*node), &mut routed);
                stage += 1;
            }
            if !kind.bubbles() {
                return routed;
            }
            self.collect(kind, BindingTarget::Document, stage, None, &mut routed);
            stage += 1;
        }
        self.collect(kind, BindingTarget::Window, stage, None, &mut routed);
        routed
    }

    fn collect(
        &self,
        kind: EventKind,
        target: BindingTarget,
        stage: usize,
        current: Option<NodeId>,
        out: &mut Vec<Routed>,
    ) {
        out.extend(
            self.bindings
                .iter()
                .filter(|b| b.kind == kind && b.target == target)
                .map(|b| Routed {
                    binding: *b,
                    stage,
                    current,
                }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handlers(routed: &[Routed]) -> Vec<Handler> {
        routed.iter().map(|r| r.binding.handler).collect()
    }

    #[test]
    fn test_click_bubbles_target_first() {
        let (link, menu) = (NodeId(5), NodeId(4));
        let mut table = EventTable::new();
        table.bind(EventKind::Click, BindingTarget::Document, Handler::NavOutsideClick);
        table.bind(EventKind::Click, BindingTarget::Node(menu), Handler::NavToggle);
        table.bind(EventKind::Click, BindingTarget::Node(link), Handler::NavLink);
        table.bind(EventKind::Click, BindingTarget::Node(link), Handler::ReadMore);

        let routed = table.route(EventKind::Click, &[link, menu, NodeId(1)]);
        assert_eq!(
            handlers(&routed),
            vec![Handler::NavLink, Handler::ReadMore, Handler::NavToggle, Handler::NavOutsideClick]
        );
        assert_eq!(routed.iter().map(|r| r.stage).collect::<Vec<_>>(), vec![0, 0, 1, 3]);
        assert_eq!(routed[2].current, Some(menu));
    }

    #[test]
    fn test_mouseenter_does_not_bubble() {
        let (hero, child) = (NodeId(2), NodeId(3));
        let mut table = EventTable::new();
        table.bind(EventKind::MouseEnter, BindingTarget::Node(hero), Handler::HeroMouseEnter);

        assert!(table.route(EventKind::MouseEnter, &[child, hero]).is_empty());
        assert_eq!(
            handlers(&table.route(EventKind::MouseEnter, &[hero])),
            vec![Handler::HeroMouseEnter]
        );
    }

    #[test]
    fn test_window_events_skip_elements() {
        let mut table = EventTable::new();
        table.bind(EventKind::Resize, BindingTarget::Window, Handler::NavResize);
        table.bind(EventKind::Resize, BindingTarget::Document, Handler::GridRender);
        table.bind(EventKind::Resize, BindingTarget::Window, Handler::GridRender);

        assert_eq!(
            handlers(&table.route(EventKind::Resize, &[])),
            vec![Handler::NavResize, Handler::GridRender]
        );
        assert_eq!(table.kinds(), vec![EventKind::Resize]);
    }

    #[test]
    fn test_dom_names() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_dom_name(kind.dom_name()), Some(kind));
        }
        assert_eq!(EventKind::from_dom_name("dblclick"), None);
    }
}
