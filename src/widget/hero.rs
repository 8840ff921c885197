//! HeroSlider - the full-width slide rotator at the top of the page
//!
//! Slides advance on a fixed interval. Tabs jump, swipes and arrow keys step.
//! Hovering (desktop widths) and a hidden page each pause the rotation on
//! their own; it resumes with a full interval once neither holds.
//! After each transition the following slide's background is prefetched.

use crate::application::ports::{NodeId, TimerHandle};
use crate::application::services::DiscreteRotation;
use crate::domain::entities::Direction;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::css;
use crate::domain::value_objects::{Key, Point, SwipeTracker, ViewportClass};
use crate::shared::config::{HeroConfig, Selectors};
use crate::widget::{ActiveGroup, Surface};

#[derive(Debug)]
pub struct HeroSlider {
    root: NodeId,
    slides: ActiveGroup,
    tabs: ActiveGroup,
    rotation: DiscreteRotation,
    swipe: SwipeTracker,
    swipe_threshold_px: f32,
    preload_count: usize,
    hovered: bool,
    hidden: bool,
}

impl HeroSlider {
    /// Find the hero and its slides, show the first slide and start rotating
    pub fn mount(
        cx: &mut Surface,
        selectors: &Selectors,
        config: &HeroConfig,
    ) -> Result<Option<Self>, DomainError> {
        let Some(root) = cx.document.query(&selectors.hero) else {
            log!("HeroSlider: no '{}' on page, skipping", selectors.hero);
            return Ok(None);
        };
        let slides = cx.document.query_all(&selectors.hero_slides);
        if slides.is_empty() {
            log!("HeroSlider: no slides, skipping");
            return Ok(None);
        }
        let tabs = cx.document.query_all(&selectors.hero_tabs);

        let mut hero = Self {
            root,
            rotation: DiscreteRotation::new(slides.len(), config.interval_ms)?,
            slides: ActiveGroup::new(slides),
            tabs: ActiveGroup::new(tabs),
            swipe: SwipeTracker::new(),
            swipe_threshold_px: config.swipe_threshold_px,
            preload_count: config.preload_count,
            hovered: false,
            hidden: false,
        };
        hero.render(cx);
        hero.rotation.start(cx.scheduler);
        log!(
            "HeroSlider: {} slides, {} tabs, every {}ms",
            hero.slides.len(),
            hero.tabs.len(),
            config.interval_ms
        );
        Ok(Some(hero))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tabs(&self) -> &[NodeId] {
        self.tabs.nodes()
    }

    pub fn current(&self) -> usize {
        self.rotation.current()
    }

    pub fn is_running(&self) -> bool {
        self.rotation.is_running()
    }

    /// Tab click: jump to the tab's slide
    pub fn on_tab_click(&mut self, cx: &mut Surface, tab: NodeId) -> bool {
        let Some(index) = self.tabs.index_of(tab) else {
            return false;
        };
        self.rotation.jump_to(index, cx.scheduler);
        self.transitioned(cx);
        true
    }

    pub fn on_touch_start(&mut self, point: Point) {
        self.swipe.begin(point);
    }

    /// Finish a touch; a horizontal swipe past the threshold steps the slider
    pub fn on_touch_end(&mut self, cx: &mut Surface, point: Point) -> bool {
        match self.swipe.finish(point, self.swipe_threshold_px) {
            Some(direction) => {
                self.step(cx, direction);
                true
            }
            None => false,
        }
    }

    /// Arrow keys step the slider above mobile width
    pub fn on_key(&mut self, cx: &mut Surface, key: &Key, viewport: ViewportClass) -> bool {
        if viewport.is_mobile {
            return false;
        }
        match key.direction() {
            Some(direction) => {
                self.step(cx, direction);
                true
            }
            None => false,
        }
    }

    /// Pointer entered the hero; only pauses above mobile width
    pub fn on_mouse_enter(&mut self, cx: &mut Surface, viewport: ViewportClass) -> bool {
        if viewport.is_mobile {
            return false;
        }
        self.hovered = true;
        self.rotation.pause(cx.scheduler);
        true
    }

    pub fn on_mouse_leave(&mut self, cx: &mut Surface) -> bool {
        if !self.hovered {
            return false;
        }
        self.hovered = false;
        self.resume_if_clear(cx);
        true
    }

    pub fn on_visibility_change(&mut self, cx: &mut Surface, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.rotation.pause(cx.scheduler);
        } else {
            self.resume_if_clear(cx);
        }
    }

    /// Warm the cache with the first slides
    pub fn on_load(&mut self, cx: &mut Surface) {
        let count = self.preload_count.min(self.slides.len());
        for i in 0..count {
            self.prefetch(cx, i);
        }
    }

    /// Returns true if the timer was this slider's
    pub fn on_timer(&mut self, cx: &mut Surface, handle: TimerHandle) -> bool {
        if self.rotation.on_timer(handle).is_none() {
            return false;
        }
        self.transitioned(cx);
        true
    }

    pub fn dispose(&mut self, cx: &mut Surface) {
        self.rotation.dispose(cx.scheduler);
    }

    fn step(&mut self, cx: &mut Surface, direction: Direction) {
        self.rotation.advance(direction, cx.scheduler);
        self.transitioned(cx);
    }

    fn resume_if_clear(&mut self, cx: &mut Surface) {
        if !self.hovered && !self.hidden {
            self.rotation.resume(cx.scheduler);
        }
    }

    fn transitioned(&mut self, cx: &mut Surface) {
        self.render(cx);
        self.prefetch(cx, self.rotation.peek_next());
    }

    fn render(&self, cx: &mut Surface) {
        let index = self.rotation.current();
        self.slides.show(cx.document, index);
        self.tabs.show(cx.document, index);
    }

    fn prefetch(&self, cx: &mut Surface, index: usize) {
        let Some(slide) = self.slides.nodes().get(index) else {
            return;
        };
        let Some(background) = cx.document.computed_style(*slide, "background-image") else {
            return;
        };
        if let Some(url) = css::extract_url(&background) {
            cx.images.prefetch(url);
        }
    }
}
