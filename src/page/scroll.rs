use crate::config::UiConfig;

pub const HERO_SELECTOR: &str = ".hero-section";
pub const BACK_TO_TOP_CLASS: &str = "back-to-top";
pub const BACK_TO_TOP_SHOW_CLASS: &str = "show";
pub const BACK_TO_TOP_TITLE: &str = "Back to top";
pub const BACK_TO_TOP_ICON: &str = r#"<i class="fas fa-arrow-up"></i>"#;

/// Hero section offset that trails the page scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub rate: f64,
}

impl Parallax {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            rate: config.parallax_rate,
        }
    }

    pub fn offset(&self, scroll_y: f64) -> f64 {
        scroll_y * self.rate
    }

    /// CSS `transform` value for the hero section
    pub fn transform(&self, scroll_y: f64) -> String {
        format!("translate3d(0, {}px, 0)", self.offset(scroll_y))
    }
}

/// Visibility of the back-to-top control
#[derive(Debug, Clone, PartialEq)]
pub struct BackToTop {
    threshold: f64,
    visible: bool,
}

impl BackToTop {
    /// Starts hidden
    pub fn new(config: &UiConfig) -> Self {
        Self {
            threshold: config.back_to_top_threshold,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Update for a scroll position; returns the new visibility when it changed
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<bool> {
        let visible = scroll_y > self.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }

    /// Vertical position a click scrolls the page to
    pub fn target(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_moves_at_half_speed() {
        let parallax = Parallax::new(&UiConfig::default());
        assert_eq!(parallax.offset(0.0), 0.0);
        assert_eq!(parallax.offset(640.0), 320.0);
        assert_eq!(parallax.transform(125.0), "translate3d(0, 62.5px, 0)");
    }

    #[test]
    fn back_to_top_toggles_around_threshold() {
        let mut control = BackToTop::new(&UiConfig::default());
        assert!(!control.is_visible());

        assert_eq!(control.on_scroll(300.0), None);
        assert_eq!(control.on_scroll(301.0), Some(true));
        assert_eq!(control.on_scroll(900.0), None);
        assert!(control.is_visible());
        assert_eq!(control.on_scroll(300.0), Some(false));
        assert_eq!(control.target(), 0.0);
    }
}
