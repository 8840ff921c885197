//! ImagePort - fire-and-forget image prefetch

/// Port interface for warming the image cache
pub trait ImagePort {
    /// Start loading `url`; the result is never observed
    fn prefetch(&mut self, url: &str);
}

/// Records prefetched URLs instead of loading them
#[derive(Debug, Default)]
pub struct PrefetchLog {
    urls: Vec<String>,
}

impl PrefetchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL requested so far, in order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }
}

impl ImagePort for PrefetchLog {
    fn prefetch(&mut self, url: &str) {
        self.urls.push(url.to_string());
    }
}
