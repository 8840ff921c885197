//! CampaignCarousel - marquee on wide screens, slideshow everywhere else
//!
//! Exactly one mode runs at a time. The marquee appends copies of the slides
//! to the track and scrolls it every animation frame; the slideshow marks one
//! slide and thumbnail active and advances on an interval. When a resize
//! crosses the desktop breakpoint the running mode is torn down completely
//! before the other one starts.

use crate::application::ports::{FrameHandle, NodeId, TimerHandle};
use crate::application::services::{ContinuousRotation, DiscreteRotation};
use crate::domain::entities::{Direction, Marquee};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ViewportClass;
use crate::shared::config::{CampaignConfig, Selectors};
use crate::widget::{ActiveGroup, Surface};

/// Which rotation drives the carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignMode {
    Marquee,
    Slideshow,
}

impl CampaignMode {
    pub fn for_viewport(viewport: ViewportClass) -> Self {
        if viewport.is_desktop_campaign {
            CampaignMode::Marquee
        } else {
            CampaignMode::Slideshow
        }
    }
}

#[derive(Debug)]
pub struct CampaignCarousel {
    track: NodeId,
    slides: ActiveGroup,
    thumbs: ActiveGroup,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    marquee: ContinuousRotation,
    slideshow: DiscreteRotation,
    /// Copies appended to the track while the marquee runs
    clones: Vec<NodeId>,
    copies: usize,
    reselect_on_resize: bool,
    mode: CampaignMode,
    hidden: bool,
}

impl CampaignCarousel {
    /// Find the track and its slides and start the mode `viewport` calls for
    pub fn mount(
        cx: &mut Surface,
        selectors: &Selectors,
        config: &CampaignConfig,
        viewport: ViewportClass,
    ) -> Result<Option<Self>, DomainError> {
        let Some(track) = cx.document.query(&selectors.campaign_track) else {
            log!("CampaignCarousel: no '{}' on page, skipping", selectors.campaign_track);
            return Ok(None);
        };
        let slides = cx.document.query_all(&selectors.campaign_slides);
        if slides.is_empty() {
            log!("CampaignCarousel: track has no slides, skipping");
            return Ok(None);
        }

        let marquee = Marquee::new(slides.len(), config.step_px, config.speed_px_per_frame)?;
        let mut carousel = Self {
            track,
            marquee: ContinuousRotation::new(marquee),
            slideshow: DiscreteRotation::new(slides.len(), config.interval_ms)?,
            slides: ActiveGroup::new(slides),
            thumbs: ActiveGroup::new(cx.document.query_all(&selectors.campaign_thumbs)),
            prev: cx.document.query(&selectors.campaign_prev),
            next: cx.document.query(&selectors.campaign_next),
            clones: Vec::new(),
            copies: config.copies,
            reselect_on_resize: config.reselect_on_resize,
            mode: CampaignMode::for_viewport(viewport),
            hidden: false,
        };
        carousel.activate(cx);
        log!(
            "CampaignCarousel: {} slides, starting in {:?} mode",
            carousel.slides.len(),
            carousel.mode
        );
        Ok(Some(carousel))
    }

    pub fn mode(&self) -> CampaignMode {
        self.mode
    }

    pub fn prev_button(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next_button(&self) -> Option<NodeId> {
        self.next
    }

    pub fn thumbs(&self) -> &[NodeId] {
        self.thumbs.nodes()
    }

    /// Slideshow index (0 while the marquee runs)
    pub fn current(&self) -> usize {
        match self.mode {
            CampaignMode::Slideshow => self.slideshow.current(),
            CampaignMode::Marquee => 0,
        }
    }

    pub fn offset(&self) -> f32 {
        self.marquee.offset()
    }

    pub fn clone_count(&self) -> usize {
        self.clones.len()
    }

    pub fn on_prev(&mut self, cx: &mut Surface) {
        self.step(cx, Direction::Backward);
    }

    pub fn on_next(&mut self, cx: &mut Surface) {
        self.step(cx, Direction::Forward);
    }

    /// Thumbnail click; only the slideshow has thumbnails to jump to
    pub fn on_thumb_click(&mut self, cx: &mut Surface, thumb: NodeId) -> bool {
        if self.mode != CampaignMode::Slideshow {
            return false;
        }
        let Some(index) = self.thumbs.index_of(thumb) else {
            return false;
        };
        self.slideshow.jump_to(index, cx.scheduler);
        self.render_slideshow(cx);
        true
    }

    /// Switch modes when the width crosses the desktop breakpoint
    pub fn on_resize(&mut self, cx: &mut Surface, viewport: ViewportClass) -> bool {
        let wanted = CampaignMode::for_viewport(viewport);
        if !self.reselect_on_resize || wanted == self.mode {
            return false;
        }
        log!("CampaignCarousel: switching {:?} -> {:?}", self.mode, wanted);
        self.teardown(cx);
        self.mode = wanted;
        self.activate(cx);
        true
    }

    /// A hidden page stops whichever mode is running
    pub fn on_visibility_change(&mut self, cx: &mut Surface, hidden: bool) {
        self.hidden = hidden;
        match (self.mode, hidden) {
            (CampaignMode::Marquee, true) => self.marquee.pause(cx.scheduler),
            (CampaignMode::Marquee, false) => self.marquee.resume(cx.scheduler),
            (CampaignMode::Slideshow, true) => self.slideshow.pause(cx.scheduler),
            (CampaignMode::Slideshow, false) => self.slideshow.resume(cx.scheduler),
        }
    }

    pub fn on_timer(&mut self, cx: &mut Surface, handle: TimerHandle) -> bool {
        if self.mode != CampaignMode::Slideshow || self.slideshow.on_timer(handle).is_none() {
            return false;
        }
        self.render_slideshow(cx);
        true
    }

    pub fn on_frame(&mut self, cx: &mut Surface, handle: FrameHandle) -> bool {
        if self.mode != CampaignMode::Marquee {
            return false;
        }
        match self.marquee.on_frame(handle, cx.scheduler) {
            Some(_) => {
                let transform = self.marquee.marquee().transform();
                cx.document.set_style(self.track, "transform", &transform);
                true
            }
            None => false,
        }
    }

    /// Stop the running mode and undo everything it did to the track
    pub fn dispose(&mut self, cx: &mut Surface) {
        self.teardown(cx);
    }

    fn step(&mut self, cx: &mut Surface, direction: Direction) {
        match self.mode {
            CampaignMode::Marquee => self.marquee.jump(direction, cx.scheduler),
            CampaignMode::Slideshow => {
                self.slideshow.advance(direction, cx.scheduler);
                self.render_slideshow(cx);
            }
        }
    }

    fn activate(&mut self, cx: &mut Surface) {
        match self.mode {
            CampaignMode::Marquee => {
                for _ in 0..self.copies {
                    for slide in self.slides.nodes() {
                        if let Some(copy) = cx.document.clone_into(*slide, self.track) {
                            self.clones.push(copy);
                        }
                    }
                }
                if self.hidden {
                    self.marquee.pause(cx.scheduler);
                } else {
                    self.marquee.start(cx.scheduler);
                }
            }
            CampaignMode::Slideshow => {
                self.slideshow.reset(cx.scheduler);
                self.render_slideshow(cx);
                if self.hidden {
                    self.slideshow.pause(cx.scheduler);
                } else {
                    self.slideshow.start(cx.scheduler);
                }
            }
        }
    }

    fn teardown(&mut self, cx: &mut Surface) {
        self.marquee.dispose(cx.scheduler);
        self.slideshow.dispose(cx.scheduler);
        for copy in self.clones.drain(..) {
            cx.document.remove(copy);
        }
        cx.document.set_style(self.track, "transform", "");
        self.slides.clear(cx.document);
        self.thumbs.clear(cx.document);
    }

    fn render_slideshow(&self, cx: &mut Surface) {
        let index = self.slideshow.current();
        self.slides.show(cx.document, index);
        self.thumbs.show(cx.document, index);
    }
}
