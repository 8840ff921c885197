//! WebImages - ImagePort that warms the browser cache with detached images

use web_sys::HtmlImageElement;

use crate::application::ports::ImagePort;

#[derive(Default)]
pub struct WebImages {
    // Held so the requests are not collected before they finish
    loading: Vec<HtmlImageElement>,
}

impl WebImages {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImagePort for WebImages {
    fn prefetch(&mut self, url: &str) {
        match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(url);
                self.loading.push(img);
            }
            Err(e) => log!("WebImages: cannot prefetch {}: {:?}", url, e),
        }
    }
}
