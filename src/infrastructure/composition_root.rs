//! HeadlessHost - composition root for running the storefront without a browser
//!
//! Wires the in-memory document, the virtual-clock scheduler and the
//! recording image port to a mounted [`Storefront`], and plays the role of
//! the browser's event loop: due timers and animation frames are delivered
//! back to the page as events.

use crate::adapters::controllers::{DispatchOutcome, PageEvent, Storefront};
use crate::application::ports::PrefetchLog;
use crate::domain::entities::Catalog;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Viewport;
use crate::infrastructure::manual_scheduler::ManualScheduler;
use crate::infrastructure::memory_document::MemoryDocument;
use crate::shared::config::SiteConfig;
use crate::widget::Surface;

/// Application composition root - owns the page and every service it uses
pub struct HeadlessHost {
    pub document: MemoryDocument,
    pub scheduler: ManualScheduler,
    pub images: PrefetchLog,
    storefront: Storefront,
}

impl HeadlessHost {
    /// Mount the storefront on `document`
    pub fn mount(
        document: MemoryDocument,
        config: &SiteConfig,
        catalog: Catalog,
        viewport: Viewport,
    ) -> Result<Self, DomainError> {
        let mut document = document;
        let mut scheduler = ManualScheduler::new();
        let mut images = PrefetchLog::new();

        let storefront = {
            let mut cx = Surface::new(&mut document, &mut scheduler, &mut images);
            Storefront::mount(&mut cx, config, catalog, viewport)?
        };

        Ok(Self {
            document,
            scheduler,
            images,
            storefront,
        })
    }

    /// Mount with the default configuration and the built-in catalog
    pub fn with_defaults(document: MemoryDocument, viewport: Viewport) -> Result<Self, DomainError> {
        Self::mount(document, &SiteConfig::default(), Catalog::builtin(), viewport)
    }

    /// Mount with site.toml from the standard locations and the built-in
    /// catalog
    pub fn from_site_config(document: MemoryDocument, viewport: Viewport) -> Result<Self, DomainError> {
        Self::mount(document, &SiteConfig::load(), Catalog::builtin(), viewport)
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    /// Deliver one event to the page
    pub fn dispatch(&mut self, event: PageEvent) -> DispatchOutcome {
        let mut cx = Surface::new(&mut self.document, &mut self.scheduler, &mut self.images);
        self.storefront.dispatch(&mut cx, &event)
    }

    /// Let `ms` of virtual time pass, delivering each timer as it comes due.
    /// Returns how many timer events were delivered.
    pub fn advance(&mut self, ms: u64) -> usize {
        let deadline = self.scheduler.now_ms() + ms;
        let mut delivered = 0;
        while let Some(handle) = self.scheduler.pop_due(deadline) {
            self.dispatch(PageEvent::TimerFired(handle));
            delivered += 1;
        }
        self.scheduler.settle(deadline);
        delivered
    }

    /// Run `rounds` repaints, delivering the frames requested before each.
    /// Returns how many frame events were delivered.
    pub fn pump_frames(&mut self, rounds: usize) -> usize {
        let mut delivered = 0;
        for _ in 0..rounds {
            for frame in self.scheduler.take_frames() {
                self.dispatch(PageEvent::AnimationFrame(frame));
                delivered += 1;
            }
        }
        delivered
    }

    /// Tear the page down
    pub fn dispose(&mut self) {
        let mut cx = Surface::new(&mut self.document, &mut self.scheduler, &mut self.images);
        self.storefront.dispose(&mut cx);
    }
}
