//! CSS value helpers shared by the renderers

/// Format a pixel length the way the transforms expect it
///
/// Negative zero prints as `0`, so an untouched transform reads `translateX(0px)`.
pub fn px(value: f32) -> String {
    if value == 0.0 {
        "0px".to_string()
    } else {
        format!("{}px", value)
    }
}

/// `translateX(<value>px)`
pub fn translate_x(value: f32) -> String {
    format!("translateX({})", px(value))
}

/// `translateY(<value>px)`
pub fn translate_y(value: f32) -> String {
    format!("translateY({})", px(value))
}

/// Pull the URL out of a computed `background-image` value
///
/// Accepts `url(foo.jpg)`, `url("foo.jpg")` and `url('foo.jpg')`. `none`,
/// gradients and empty values yield `None`.
pub fn extract_url(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("url(")?.strip_suffix(')')?.trim();
    let unquoted = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(inner);

    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(0.0), "0px");
        assert_eq!(px(-0.0), "0px");
        assert_eq!(px(-470.5), "-470.5px");
        assert_eq!(translate_x(-12.0), "translateX(-12px)");
        assert_eq!(translate_y(-0.0), "translateY(0px)");
    }

    #[test]
    fn test_extract_url() {
        assert_eq!(extract_url(r#"url("./images/hero1.jpg")"#), Some("./images/hero1.jpg"));
        assert_eq!(extract_url("url('a.png')"), Some("a.png"));
        assert_eq!(extract_url("url(b.webp)"), Some("b.webp"));
        assert_eq!(extract_url("none"), None);
        assert_eq!(extract_url(""), None);
        assert_eq!(extract_url("url(\"\")"), None);
        assert_eq!(extract_url("linear-gradient(red, blue)"), None);
    }
}
