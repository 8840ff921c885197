//! CouponBanner - dismissible banner
//!
//! Closing adds `hide` (the stylesheet animates it away) and takes the banner
//! out of layout once the animation has had time to finish.

use crate::application::ports::{NodeId, TimerHandle};
use crate::application::services::TimerSlot;
use crate::shared::config::{CouponConfig, Selectors};
use crate::widget::Surface;

const HIDE_CLASS: &str = "hide";

#[derive(Debug)]
pub struct CouponBanner {
    banner: NodeId,
    close: NodeId,
    hide_timer: TimerSlot,
}

impl CouponBanner {
    pub fn mount(cx: &mut Surface, selectors: &Selectors, config: &CouponConfig) -> Option<Self> {
        let banner = cx.document.query(&selectors.coupon_banner);
        let close = cx.document.query(&selectors.coupon_close);
        let (Some(banner), Some(close)) = (banner, close) else {
            log!("CouponBanner: banner or close button missing, skipping");
            return None;
        };
        Some(Self {
            banner,
            close,
            hide_timer: TimerSlot::timeout(config.hide_delay_ms),
        })
    }

    pub fn close_button(&self) -> NodeId {
        self.close
    }

    pub fn on_close(&mut self, cx: &mut Surface) {
        cx.document.set_class(self.banner, HIDE_CLASS, true);
        self.hide_timer.restart(cx.scheduler);
    }

    pub fn on_timer(&mut self, cx: &mut Surface, handle: TimerHandle) -> bool {
        if !self.hide_timer.fire(handle) {
            return false;
        }
        cx.document.set_style(self.banner, "display", "none");
        true
    }

    pub fn dispose(&mut self, cx: &mut Surface) {
        self.hide_timer.cancel(cx.scheduler);
    }
}
