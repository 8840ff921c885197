//! Viewport value objects - window size and the breakpoints derived from it

use serde::{Deserialize, Serialize};

/// Visible window size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Derive the layout classes for these breakpoints
    pub fn classify(&self, breakpoints: &Breakpoints) -> ViewportClass {
        ViewportClass {
            is_mobile: self.width <= breakpoints.mobile_max_width,
            is_desktop_campaign: self.width > breakpoints.campaign_desktop_min_width,
        }
    }
}

/// Width thresholds that switch widget variants
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Widths at or below this are mobile
    #[serde(default = "default_mobile_max_width")]
    pub mobile_max_width: f32,
    /// Widths strictly above this get the campaign marquee
    #[serde(default = "default_campaign_desktop_min_width")]
    pub campaign_desktop_min_width: f32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max_width: default_mobile_max_width(),
            campaign_desktop_min_width: default_campaign_desktop_min_width(),
        }
    }
}

fn default_mobile_max_width() -> f32 {
    768.0
}

fn default_campaign_desktop_min_width() -> f32 {
    992.0
}

/// Layout classes derived from a viewport; never stored, always recomputed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ViewportClass {
    pub is_mobile: bool,
    pub is_desktop_campaign: bool,
}

impl ViewportClass {
    /// Desktop for hover pause, arrow keys and the nav drawer
    pub fn is_desktop(&self) -> bool {
        !self.is_mobile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_edges() {
        let bp = Breakpoints::default();

        let phone = Viewport::new(768.0, 900.0).classify(&bp);
        assert!(phone.is_mobile);
        assert!(!phone.is_desktop_campaign);

        let tablet = Viewport::new(769.0, 900.0).classify(&bp);
        assert!(tablet.is_desktop());
        assert!(!tablet.is_desktop_campaign);

        let at_campaign_edge = Viewport::new(992.0, 900.0).classify(&bp);
        assert!(!at_campaign_edge.is_desktop_campaign);

        let desktop = Viewport::new(993.0, 900.0).classify(&bp);
        assert!(desktop.is_desktop_campaign);
        assert!(!desktop.is_mobile);
    }
}
