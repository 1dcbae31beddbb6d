//! Smooth-scroll anchor math and the scroll-to-top button.

use std::time::Duration;

/// Scroll distance after which the scroll-to-top button shows.
pub const SHOW_AFTER: f64 = 240.0;

/// Gap kept between the sticky header and the scrolled-to section.
pub const HEADER_GAP: f64 = 12.0;

/// Wait before scrolling to the hash target on page load, so layout settles.
pub const INITIAL_SCROLL_DELAY: Duration = Duration::from_millis(80);

#[must_use]
pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SHOW_AFTER
}

/// Document offset to scroll to so the element sits just below the header.
#[must_use]
pub fn anchor_offset(scroll_y: f64, element_top: f64, header_height: f64) -> f64 {
    (scroll_y + element_top - (header_height + HEADER_GAP)).max(0.0)
}

/// Section id from an in-page link or location hash (`#nosotros` -> `nosotros`).
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_top_threshold_is_exclusive() {
        assert!(!scroll_top_visible(0.0));
        assert!(!scroll_top_visible(240.0));
        assert!(scroll_top_visible(240.5));
    }

    #[test]
    fn anchor_offset_accounts_for_header_and_gap() {
        assert!((anchor_offset(100.0, 500.0, 64.0) - 524.0).abs() < f64::EPSILON);
    }

    #[test]
    fn anchor_offset_never_negative() {
        assert!(anchor_offset(0.0, 10.0, 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn anchor_target_parsing() {
        assert_eq!(anchor_target("#herramientas"), Some("herramientas"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("login.html"), None);
    }
}
