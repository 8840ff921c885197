//! Widget system for Vitrine
//!
//! Widgets are the independent interactive pieces of the storefront page.
//! Each one is mounted from the document once, owns its own state and
//! timers, and only ever touches the document through the [`Surface`] it is
//! handed for the duration of one event.
//!
//! A widget whose elements are missing from the page is simply not mounted.

pub mod anchor_scroll;
pub mod campaign;
pub mod coupon;
pub mod hero;
pub mod indicators;
pub mod nav_drawer;
pub mod newsletter;
pub mod parallax;
pub mod product_grid;
pub mod ranking;

use crate::application::ports::{DocumentPort, ImagePort, SchedulerPort};

pub use anchor_scroll::ReadMoreLinks;
pub use campaign::{CampaignCarousel, CampaignMode};
pub use coupon::CouponBanner;
pub use hero::HeroSlider;
pub use indicators::ActiveGroup;
pub use nav_drawer::NavDrawer;
pub use newsletter::NewsletterForm;
pub use parallax::ScrollScrub;
pub use product_grid::{product_card, ranked_card, render_cards, NewArrivalsGrid};
pub use ranking::RankingSelector;

/// Class that marks the visible slide, tab or open drawer
pub const ACTIVE_CLASS: &str = "active";

/// The host services a widget may use while handling one event
pub struct Surface<'a> {
    pub document: &'a mut dyn DocumentPort,
    pub scheduler: &'a mut dyn SchedulerPort,
    pub images: &'a mut dyn ImagePort,
}

impl<'a> Surface<'a> {
    pub fn new(
        document: &'a mut dyn DocumentPort,
        scheduler: &'a mut dyn SchedulerPort,
        images: &'a mut dyn ImagePort,
    ) -> Self {
        Self {
            document,
            scheduler,
            images,
        }
    }
}

/// What a handler did with an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventResult {
    /// The event was not for this handler
    #[default]
    NotHandled,
    /// Consumed; default action and propagation untouched
    Handled,
    /// Consumed; the host should cancel the default action
    PreventDefault,
    /// Consumed; later propagation stages are skipped
    StopPropagation,
}

impl EventResult {
    pub fn is_handled(self) -> bool {
        self != EventResult::NotHandled
    }

    /// `Handled` when `handled`, otherwise `NotHandled`
    pub fn from_handled(handled: bool) -> Self {
        if handled {
            EventResult::Handled
        } else {
            EventResult::NotHandled
        }
    }
}
