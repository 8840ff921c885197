//! Site Configuration (site.toml)
//!
//! Every section is optional; anything missing falls back to the values the
//! shipped page markup expects.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Breakpoints, Selector};

/// Site configuration loaded from site.toml
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub hero: HeroConfig,
    pub campaign: CampaignConfig,
    pub breakpoints: Breakpoints,
    pub grid: GridConfig,
    pub coupon: CouponConfig,
    pub selectors: SelectorConfig,
}

/// Hero slider timing and gestures
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Auto-advance period
    pub interval_ms: u32,
    /// Minimum horizontal travel for a swipe
    pub swipe_threshold_px: f32,
    /// Slides prefetched on load
    pub preload_count: usize,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            interval_ms: 6000,
            swipe_threshold_px: 50.0,
            preload_count: 2,
        }
    }
}

/// Campaign carousel (marquee on desktop, slideshow below)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Slideshow auto-advance period
    pub interval_ms: u32,
    /// Slide width plus gap
    pub step_px: f32,
    pub speed_px_per_frame: f32,
    /// How many copies of the slides are appended to the marquee track
    pub copies: usize,
    /// Switch modes when a resize crosses the desktop breakpoint
    pub reselect_on_resize: bool,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            step_px: 470.0,
            speed_px_per_frame: 0.5,
            copies: 1,
            reselect_on_resize: true,
        }
    }
}

/// Product grids
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// New arrivals shown at mobile width
    pub mobile_count: usize,
    /// New arrivals shown above mobile width
    pub desktop_count: usize,
    /// Prefix for every product and badge image
    pub image_dir: String,
    pub new_badge: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            mobile_count: 4,
            desktop_count: 10,
            image_dir: "./images".to_string(),
            new_badge: "new.png".to_string(),
        }
    }
}

impl GridConfig {
    /// Path of an image file under `image_dir`
    pub fn image_url(&self, file: &str) -> String {
        format!("{}/{}", self.image_dir.trim_end_matches('/'), file)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouponConfig {
    /// Delay between the hide animation starting and the banner leaving layout
    pub hide_delay_ms: u32,
}

impl Default for CouponConfig {
    fn default() -> Self {
        Self { hide_delay_ms: 300 }
    }
}

/// Selector strings for every element the widgets touch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub hero: String,
    pub hero_slides: String,
    pub hero_tabs: String,
    pub coupon_banner: String,
    pub coupon_close: String,
    pub read_more: String,
    pub campaign_track: String,
    pub campaign_slides: String,
    pub campaign_prev: String,
    pub campaign_next: String,
    pub campaign_thumbs: String,
    pub newsletter_form: String,
    pub about_section: String,
    pub about_images: String,
    pub product_grid: String,
    pub ranking_grid: String,
    pub ranking_tabs: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            nav_toggle: "#mobile-menu-toggle".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_links: ".nav-menu a".to_string(),
            hero: ".hero".to_string(),
            hero_slides: ".slide".to_string(),
            hero_tabs: ".tab".to_string(),
            coupon_banner: "#coupon-banner".to_string(),
            coupon_close: "#close-coupon".to_string(),
            read_more: ".read-more-btn".to_string(),
            campaign_track: ".campaign-carousel".to_string(),
            campaign_slides: ".campaign-slide".to_string(),
            campaign_prev: ".campaign-nav .carousel-prev".to_string(),
            campaign_next: ".campaign-nav .carousel-next".to_string(),
            campaign_thumbs: ".campaign-thumb".to_string(),
            newsletter_form: ".newsletter-form form".to_string(),
            about_section: ".about-section".to_string(),
            about_images: ".about-images".to_string(),
            product_grid: ".product-grid".to_string(),
            ranking_grid: ".ranking-grid".to_string(),
            ranking_tabs: ".ranking-tab".to_string(),
        }
    }
}

/// Parsed form of [`SelectorConfig`]
#[derive(Clone, Debug)]
pub struct Selectors {
    pub nav_toggle: Selector,
    pub nav_menu: Selector,
    pub nav_links: Selector,
    pub hero: Selector,
    pub hero_slides: Selector,
    pub hero_tabs: Selector,
    pub coupon_banner: Selector,
    pub coupon_close: Selector,
    pub read_more: Selector,
    pub campaign_track: Selector,
    pub campaign_slides: Selector,
    pub campaign_prev: Selector,
    pub campaign_next: Selector,
    pub campaign_thumbs: Selector,
    pub newsletter_form: Selector,
    pub about_section: Selector,
    pub about_images: Selector,
    pub product_grid: Selector,
    pub ranking_grid: Selector,
    pub ranking_tabs: Selector,
}

impl SelectorConfig {
    /// Parse every selector, failing on the first bad one
    pub fn compile(&self) -> Result<Selectors, DomainError> {
        Ok(Selectors {
            nav_toggle: Selector::parse(&self.nav_toggle)?,
            nav_menu: Selector::parse(&self.nav_menu)?,
            nav_links: Selector::parse(&self.nav_links)?,
            hero: Selector::parse(&self.hero)?,
            hero_slides: Selector::parse(&self.hero_slides)?,
            hero_tabs: Selector::parse(&self.hero_tabs)?,
            coupon_banner: Selector::parse(&self.coupon_banner)?,
            coupon_close: Selector::parse(&self.coupon_close)?,
            read_more: Selector::parse(&self.read_more)?,
            campaign_track: Selector::parse(&self.campaign_track)?,
            campaign_slides: Selector::parse(&self.campaign_slides)?,
            campaign_prev: Selector::parse(&self.campaign_prev)?,
            campaign_next: Selector::parse(&self.campaign_next)?,
            campaign_thumbs: Selector::parse(&self.campaign_thumbs)?,
            newsletter_form: Selector::parse(&self.newsletter_form)?,
            about_section: Selector::parse(&self.about_section)?,
            about_images: Selector::parse(&self.about_images)?,
            product_grid: Selector::parse(&self.product_grid)?,
            ranking_grid: Selector::parse(&self.ranking_grid)?,
            ranking_tabs: Selector::parse(&self.ranking_tabs)?,
        })
    }
}

impl SiteConfig {
    /// Places site.toml is looked for, in order: <config dir>/vitrine, cwd
    pub fn config_candidates() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("vitrine").join("site.toml"))
            .into_iter()
            .chain(std::iter::once(PathBuf::from("site.toml")))
            .collect()
    }

    /// Find site.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        Self::config_candidates().into_iter().find(|c| c.exists())
    }

    /// Load configuration from file, returning defaults if not found or invalid
    pub fn load() -> Self {
        Self::load_first(&Self::config_candidates())
    }

    /// Load the first of `candidates` that exists; defaults if none does or
    /// it cannot be used
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        let Some(path) = candidates.iter().find(|c| c.exists()) else {
            log!("No site.toml found, using defaults");
            return Self::default();
        };
        match Self::load_from_path(path) {
            Ok(config) => {
                log!("Loaded {}", path.display());
                config
            }
            Err(e) => {
                log!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON text, as handed over by a browser host
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the widgets cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.interval_ms == 0 {
            return Err(ConfigError::Invalid("hero.interval_ms must be positive".into()));
        }
        if self.campaign.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "campaign.interval_ms must be positive".into(),
            ));
        }
        if self.campaign.step_px.is_nan() || self.campaign.step_px <= 0.0 {
            return Err(ConfigError::Invalid("campaign.step_px must be positive".into()));
        }
        if self.campaign.speed_px_per_frame.is_nan() || self.campaign.speed_px_per_frame <= 0.0 {
            return Err(ConfigError::Invalid(
                "campaign.speed_px_per_frame must be positive".into(),
            ));
        }
        if self.campaign.copies == 0 {
            return Err(ConfigError::Invalid("campaign.copies must be at least 1".into()));
        }
        if self.hero.swipe_threshold_px.is_nan() || self.hero.swipe_threshold_px < 0.0 {
            return Err(ConfigError::Invalid(
                "hero.swipe_threshold_px must not be negative".into(),
            ));
        }
        self.selectors.compile()?;
        Ok(())
    }
}

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid selector: {0}")]
    Selector(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_page() {
        let config = SiteConfig::default();
        assert_eq!(config.hero.interval_ms, 6000);
        assert_eq!(config.campaign.interval_ms, 3000);
        assert_eq!(config.campaign.step_px, 470.0);
        assert_eq!(config.breakpoints.mobile_max_width, 768.0);
        assert_eq!(config.breakpoints.campaign_desktop_min_width, 992.0);
        assert_eq!(config.grid.image_url("new.png"), "./images/new.png");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SiteConfig::from_toml_str(
            r##"
            [hero]
            interval_ms = 4000

            [campaign]
            copies = 2
            reselect_on_resize = false

            [selectors]
            hero = "#top-hero"
            "##,
        )
        .unwrap();

        assert_eq!(config.hero.interval_ms, 4000);
        assert_eq!(config.hero.swipe_threshold_px, 50.0);
        assert_eq!(config.campaign.copies, 2);
        assert!(!config.campaign.reselect_on_resize);
        assert_eq!(config.selectors.hero, "#top-hero");
        assert_eq!(config.selectors.hero_tabs, ".tab");
    }

    #[test]
    fn test_validation_errors() {
        let zero_interval = SiteConfig::from_toml_str("[hero]\ninterval_ms = 0\n");
        assert!(matches!(zero_interval, Err(ConfigError::Invalid(_))));

        let zero_copies = SiteConfig::from_toml_str("[campaign]\ncopies = 0\n");
        assert!(matches!(zero_copies, Err(ConfigError::Invalid(_))));

        let bad_selector = SiteConfig::from_toml_str("[selectors]\nhero = \".hero >\"\n");
        assert!(matches!(bad_selector, Err(ConfigError::Selector(_))));

        let bad_toml = SiteConfig::from_toml_str("[hero\n");
        assert!(matches!(bad_toml, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_json_config() {
        let config =
            SiteConfig::from_json_str(r#"{"coupon": {"hide_delay_ms": 500}, "hero": {"preload_count": 0}}"#)
                .unwrap();
        assert_eq!(config.coupon.hide_delay_ms, 500);
        assert_eq!(config.hero.preload_count, 0);
        assert_eq!(config.hero.interval_ms, 6000);

        let invalid = SiteConfig::from_json_str(r#"{"campaign": {"step_px": -1.0}}"#);
        assert!(matches!(invalid, Err(ConfigError::Invalid(_))));
        assert!(matches!(SiteConfig::from_json_str("[]"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nmobile_count = 2\nimage_dir = \"/static/img/\"").unwrap();

        let config = SiteConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.grid.mobile_count, 2);
        assert_eq!(config.grid.image_url("p.jpg"), "/static/img/p.jpg");

        let missing = SiteConfig::load_from_path(Path::new("/nonexistent/site.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_candidates_order() {
        let candidates = SiteConfig::config_candidates();
        let last = candidates.last().unwrap();
        assert_eq!(last, &PathBuf::from("site.toml"));
        if candidates.len() == 2 {
            assert!(candidates[0].ends_with("vitrine/site.toml"));
        }
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user").join("site.toml");
        let local = dir.path().join("site.toml");

        // Nothing on disk
        let config = SiteConfig::load_first(&[user.clone(), local.clone()]);
        assert_eq!(config, SiteConfig::default());

        // Only the later candidate exists
        std::fs::write(&local, "[coupon]\nhide_delay_ms = 450\n").unwrap();
        let config = SiteConfig::load_first(&[user.clone(), local.clone()]);
        assert_eq!(config.coupon.hide_delay_ms, 450);

        // The earlier candidate wins, but an invalid one is ignored outright
        std::fs::create_dir_all(user.parent().unwrap()).unwrap();
        std::fs::write(&user, "[hero]\ninterval_ms = 0\n").unwrap();
        let config = SiteConfig::load_first(&[user.clone(), local.clone()]);
        assert_eq!(config, SiteConfig::default());

        std::fs::write(&user, "[hero]\ninterval_ms = 9000\n").unwrap();
        let config = SiteConfig::load_first(&[user, local]);
        assert_eq!(config.hero.interval_ms, 9000);
        assert_eq!(config.coupon.hide_delay_ms, 300);
    }
}
