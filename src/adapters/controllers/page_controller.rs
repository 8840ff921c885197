//! Storefront - mounts every widget and routes page events to them
//!
//! The host owns the document, the scheduler and the image loader. It mounts
//! a [`Storefront`] once, then feeds it every [`PageEvent`] together with a
//! [`Surface`] borrowing those services. Timer and frame events carry the
//! handle the scheduler gave out; only the widget holding that handle reacts.

use crate::adapters::controllers::event_table::{
    BindingTarget, EventKind, EventTable, Handler, Routed,
};
use crate::application::ports::{FrameHandle, NodeId, TimerHandle};
use crate::domain::entities::Catalog;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Breakpoints, Key, Point, Viewport, ViewportClass};
use crate::shared::config::SiteConfig;
use crate::widget::{
    CampaignCarousel, CouponBanner, EventResult, HeroSlider, NavDrawer, NewArrivalsGrid,
    NewsletterForm, RankingSelector, ReadMoreLinks, ScrollScrub, Surface,
};

/// Everything the host can tell the page
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    Click { target: NodeId },
    KeyDown { key: Key },
    TouchStart { target: NodeId, point: Point },
    TouchEnd { target: NodeId, point: Point },
    MouseEnter { target: NodeId },
    MouseLeave { target: NodeId },
    Submit { target: NodeId },
    Scroll { scroll_y: f32 },
    /// The window now has this size
    Resize(Viewport),
    VisibilityChange { hidden: bool },
    Load,
    TimerFired(TimerHandle),
    AnimationFrame(FrameHandle),
}

impl PageEvent {
    /// Listener kind, `None` for scheduler deliveries
    pub fn kind(&self) -> Option<EventKind> {
        Some(match self {
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::KeyDown { .. } => EventKind::KeyDown,
            PageEvent::TouchStart { .. } => EventKind::TouchStart,
            PageEvent::TouchEnd { .. } => EventKind::TouchEnd,
            PageEvent::MouseEnter { .. } => EventKind::MouseEnter,
            PageEvent::MouseLeave { .. } => EventKind::MouseLeave,
            PageEvent::Submit { .. } => EventKind::Submit,
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize(_) => EventKind::Resize,
            PageEvent::VisibilityChange { .. } => EventKind::VisibilityChange,
            PageEvent::Load => EventKind::Load,
            PageEvent::TimerFired(_) | PageEvent::AnimationFrame(_) => return None,
        })
    }

    /// The element the event was fired at
    pub fn target(&self) -> Option<NodeId> {
        match self {
            PageEvent::Click { target }
            | PageEvent::TouchStart { target, .. }
            | PageEvent::TouchEnd { target, .. }
            | PageEvent::MouseEnter { target }
            | PageEvent::MouseLeave { target }
            | PageEvent::Submit { target } => Some(*target),
            _ => None,
        }
    }
}

/// Combined result of every handler an event reached
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub handled: bool,
    /// The host should call `preventDefault`
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    fn record(&mut self, result: EventResult) {
        match result {
            EventResult::NotHandled => {}
            EventResult::Handled => self.handled = true,
            EventResult::PreventDefault => {
                self.handled = true;
                self.default_prevented = true;
            }
            EventResult::StopPropagation => {
                self.handled = true;
                self.propagation_stopped = true;
            }
        }
    }
}

/// The mounted page
#[derive(Debug)]
pub struct Storefront {
    breakpoints: Breakpoints,
    viewport: Viewport,
    nav: Option<NavDrawer>,
    hero: Option<HeroSlider>,
    coupon: Option<CouponBanner>,
    read_more: Option<ReadMoreLinks>,
    campaign: Option<CampaignCarousel>,
    newsletter: Option<NewsletterForm>,
    scrub: Option<ScrollScrub>,
    grid: Option<NewArrivalsGrid>,
    ranking: Option<RankingSelector>,
    table: EventTable,
    disposed: bool,
}

impl Storefront {
    /// Mount every widget whose elements are on the page and build the
    /// event table. Timers that run from page start are started here.
    pub fn mount(
        cx: &mut Surface,
        config: &SiteConfig,
        catalog: Catalog,
        viewport: Viewport,
    ) -> Result<Self, DomainError> {
        log_fn!("Storefront::mount", "{}x{}", viewport.width, viewport.height);
        let selectors = config.selectors.compile()?;
        let class = viewport.classify(&config.breakpoints);

        let nav = NavDrawer::mount(cx, &selectors, class);
        let hero = HeroSlider::mount(cx, &selectors, &config.hero)?;
        let coupon = CouponBanner::mount(cx, &selectors, &config.coupon);
        let read_more = ReadMoreLinks::mount(cx, &selectors);
        let campaign = CampaignCarousel::mount(cx, &selectors, &config.campaign, class)?;
        let newsletter = NewsletterForm::mount(cx, &selectors);
        let scrub = ScrollScrub::mount(cx, &selectors);
        let grid = NewArrivalsGrid::mount(cx, &selectors, &config.grid, catalog.new_arrivals);
        let ranking = RankingSelector::mount(cx, &selectors, &config.grid, catalog.rankings);

        let mut page = Self {
            breakpoints: config.breakpoints,
            viewport,
            nav,
            hero,
            coupon,
            read_more,
            campaign,
            newsletter,
            scrub,
            grid,
            ranking,
            table: EventTable::new(),
            disposed: false,
        };
        page.table = page.build_table();
        log!("Storefront: {} bindings", page.table.len());
        Ok(page)
    }

    /// Listener rows in registration order
    fn build_table(&self) -> EventTable {
        use BindingTarget::{Document, Node, Window};

        let mut table = EventTable::new();
        if let Some(nav) = &self.nav {
            table.bind(EventKind::Click, Node(nav.toggle()), Handler::NavToggle);
            table.bind_each(EventKind::Click, nav.links(), Handler::NavLink);
            table.bind(EventKind::Click, Document, Handler::NavOutsideClick);
        }
        if let Some(hero) = &self.hero {
            table.bind_each(EventKind::Click, hero.tabs(), Handler::HeroTab);
            table.bind(EventKind::MouseEnter, Node(hero.root()), Handler::HeroMouseEnter);
            table.bind(EventKind::MouseLeave, Node(hero.root()), Handler::HeroMouseLeave);
        }
        if let Some(coupon) = &self.coupon {
            table.bind(EventKind::Click, Node(coupon.close_button()), Handler::CouponClose);
        }
        if let Some(read_more) = &self.read_more {
            table.bind_each(EventKind::Click, read_more.links(), Handler::ReadMore);
        }
        if let Some(hero) = &self.hero {
            table.bind(EventKind::TouchStart, Node(hero.root()), Handler::HeroTouchStart);
            table.bind(EventKind::TouchEnd, Node(hero.root()), Handler::HeroTouchEnd);
            table.bind(EventKind::KeyDown, Document, Handler::HeroKeys);
            table.bind(EventKind::VisibilityChange, Document, Handler::HeroVisibility);
        }
        if self.nav.is_some() {
            table.bind(EventKind::Resize, Window, Handler::NavResize);
        }
        if self.hero.is_some() {
            table.bind(EventKind::Load, Window, Handler::HeroPreload);
        }
        if let Some(campaign) = &self.campaign {
            if let Some(prev) = campaign.prev_button() {
                table.bind(EventKind::Click, Node(prev), Handler::CampaignPrev);
            }
            if let Some(next) = campaign.next_button() {
                table.bind(EventKind::Click, Node(next), Handler::CampaignNext);
            }
            table.bind_each(EventKind::Click, campaign.thumbs(), Handler::CampaignThumb);
            table.bind(EventKind::Resize, Window, Handler::CampaignResize);
            table.bind(EventKind::VisibilityChange, Document, Handler::CampaignVisibility);
        }
        if let Some(newsletter) = &self.newsletter {
            table.bind(EventKind::Submit, Node(newsletter.form()), Handler::NewsletterSubmit);
        }
        if self.scrub.is_some() {
            table.bind(EventKind::Scroll, Window, Handler::ScrollScrub);
        }
        if self.grid.is_some() {
            table.bind(EventKind::Load, Window, Handler::GridRender);
            table.bind(EventKind::Resize, Window, Handler::GridRender);
        }
        if let Some(ranking) = &self.ranking {
            table.bind_each(EventKind::Click, ranking.tabs(), Handler::RankingTab);
            table.bind(EventKind::Load, Window, Handler::RankingLoad);
        }
        table
    }

    /// The page's listeners
    pub fn bindings(&self) -> &EventTable {
        &self.table
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport.classify(&self.breakpoints)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn nav(&self) -> Option<&NavDrawer> {
        self.nav.as_ref()
    }

    pub fn hero(&self) -> Option<&HeroSlider> {
        self.hero.as_ref()
    }

    pub fn campaign(&self) -> Option<&CampaignCarousel> {
        self.campaign.as_ref()
    }

    pub fn ranking(&self) -> Option<&RankingSelector> {
        self.ranking.as_ref()
    }

    /// Deliver one event
    pub fn dispatch(&mut self, cx: &mut Surface, event: &PageEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if self.disposed {
            return outcome;
        }

        match event {
            PageEvent::TimerFired(handle) => {
                outcome.record(EventResult::from_handled(self.on_timer(cx, *handle)));
                return outcome;
            }
            PageEvent::AnimationFrame(handle) => {
                let handled = self
                    .campaign
                    .as_mut()
                    .is_some_and(|campaign| campaign.on_frame(cx, *handle));
                outcome.record(EventResult::from_handled(handled));
                return outcome;
            }
            PageEvent::Resize(viewport) => self.viewport = *viewport,
            _ => {}
        }

        let Some(kind) = event.kind() else {
            return outcome;
        };
        let path = propagation_path(cx, event.target());

        let mut stopped_at = None;
        for routed in self.table.route(kind, &path) {
            if stopped_at.is_some_and(|stage| routed.stage > stage) {
                break;
            }
            let result = self.invoke(cx, &routed, event, &path);
            if result == EventResult::StopPropagation {
                stopped_at = Some(routed.stage);
            }
            outcome.record(result);
        }
        outcome
    }

    /// Cancel every timer and frame, undo the campaign track and detach all
    /// bindings. Later events are ignored.
    pub fn dispose(&mut self, cx: &mut Surface) {
        if self.disposed {
            return;
        }
        if let Some(hero) = self.hero.as_mut() {
            hero.dispose(cx);
        }
        if let Some(campaign) = self.campaign.as_mut() {
            campaign.dispose(cx);
        }
        if let Some(coupon) = self.coupon.as_mut() {
            coupon.dispose(cx);
        }
        self.table.clear();
        self.disposed = true;
        log!("Storefront: disposed");
    }

    fn on_timer(&mut self, cx: &mut Surface, handle: TimerHandle) -> bool {
        if let Some(hero) = self.hero.as_mut() {
            if hero.on_timer(cx, handle) {
                return true;
            }
        }
        if let Some(campaign) = self.campaign.as_mut() {
            if campaign.on_timer(cx, handle) {
                return true;
            }
        }
        self.coupon
            .as_mut()
            .is_some_and(|coupon| coupon.on_timer(cx, handle))
    }

    fn invoke(
        &mut self,
        cx: &mut Surface,
        routed: &Routed,
        event: &PageEvent,
        path: &[NodeId],
    ) -> EventResult {
        let class = self.viewport_class();
        let viewport = self.viewport;
        let current = routed.current;

        let result = match routed.binding.handler {
            Handler::NavToggle => self.nav.as_mut().map(|nav| {
                nav.on_toggle(cx);
                EventResult::Handled
            }),
            Handler::NavLink => self.nav.as_mut().map(|nav| {
                nav.on_link_click(cx);
                EventResult::Handled
            }),
            Handler::NavOutsideClick => self
                .nav
                .as_mut()
                .map(|nav| EventResult::from_handled(nav.on_document_click(cx, path))),
            Handler::NavResize => self
                .nav
                .as_mut()
                .map(|nav| EventResult::from_handled(nav.on_resize(cx, class))),
            Handler::HeroTab => self
                .hero
                .as_mut()
                .zip(current)
                .map(|(hero, tab)| EventResult::from_handled(hero.on_tab_click(cx, tab))),
            Handler::HeroMouseEnter => self
                .hero
                .as_mut()
                .map(|hero| EventResult::from_handled(hero.on_mouse_enter(cx, class))),
            Handler::HeroMouseLeave => self
                .hero
                .as_mut()
                .map(|hero| EventResult::from_handled(hero.on_mouse_leave(cx))),
            Handler::HeroTouchStart => match (self.hero.as_mut(), event) {
                (Some(hero), PageEvent::TouchStart { point, .. }) => {
                    hero.on_touch_start(*point);
                    Some(EventResult::Handled)
                }
                _ => None,
            },
            Handler::HeroTouchEnd => match (self.hero.as_mut(), event) {
                (Some(hero), PageEvent::TouchEnd { point, .. }) => {
                    Some(EventResult::from_handled(hero.on_touch_end(cx, *point)))
                }
                _ => None,
            },
            Handler::HeroKeys => match (self.hero.as_mut(), event) {
                (Some(hero), PageEvent::KeyDown { key }) => {
                    Some(EventResult::from_handled(hero.on_key(cx, key, class)))
                }
                _ => None,
            },
            Handler::HeroVisibility => match (self.hero.as_mut(), event) {
                (Some(hero), PageEvent::VisibilityChange { hidden }) => {
                    hero.on_visibility_change(cx, *hidden);
                    Some(EventResult::Handled)
                }
                _ => None,
            },
            Handler::HeroPreload => self.hero.as_mut().map(|hero| {
                hero.on_load(cx);
                EventResult::Handled
            }),
            Handler::CouponClose => self.coupon.as_mut().map(|coupon| {
                coupon.on_close(cx);
                EventResult::StopPropagation
            }),
            Handler::ReadMore => self.read_more.as_ref().zip(current).map(|(links, link)| {
                links.on_click(cx, link);
                EventResult::PreventDefault
            }),
            Handler::CampaignPrev => self.campaign.as_mut().map(|campaign| {
                campaign.on_prev(cx);
                EventResult::Handled
            }),
            Handler::CampaignNext => self.campaign.as_mut().map(|campaign| {
                campaign.on_next(cx);
                EventResult::Handled
            }),
            Handler::CampaignThumb => self
                .campaign
                .as_mut()
                .zip(current)
                .map(|(campaign, thumb)| EventResult::from_handled(campaign.on_thumb_click(cx, thumb))),
            Handler::CampaignResize => self
                .campaign
                .as_mut()
                .map(|campaign| EventResult::from_handled(campaign.on_resize(cx, class))),
            Handler::CampaignVisibility => match (self.campaign.as_mut(), event) {
                (Some(campaign), PageEvent::VisibilityChange { hidden }) => {
                    campaign.on_visibility_change(cx, *hidden);
                    Some(EventResult::Handled)
                }
                _ => None,
            },
            Handler::NewsletterSubmit => self.newsletter.as_ref().map(|form| {
                form.on_submit(cx);
                EventResult::PreventDefault
            }),
            Handler::ScrollScrub => match (self.scrub.as_ref(), event) {
                (Some(scrub), PageEvent::Scroll { scroll_y }) => {
                    Some(EventResult::from_handled(scrub.on_scroll(cx, *scroll_y, viewport)))
                }
                _ => None,
            },
            Handler::GridRender => self.grid.as_ref().map(|grid| {
                grid.render(cx, class);
                EventResult::Handled
            }),
            Handler::RankingTab => self
                .ranking
                .as_mut()
                .zip(current)
                .map(|(ranking, tab)| EventResult::from_handled(ranking.on_tab_click(cx, tab))),
            Handler::RankingLoad => self.ranking.as_mut().map(|ranking| {
                ranking.on_load(cx);
                EventResult::Handled
            }),
        };
        result.unwrap_or_default()
    }
}

/// `target` followed by each of its ancestors
fn propagation_path(cx: &mut Surface, target: Option<NodeId>) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = target;
    while let Some(node) = current {
        path.push(node);
        current = cx.document.parent(node);
    }
    path
}
