pub mod loading;
pub mod reveal;
pub mod scroll;

pub use loading::{LoadingTarget, Restore, SubmitLoading};
pub use reveal::{RevealOptions, RevealTracker};
pub use scroll::{BackToTop, Parallax};

pub const HOVER_CARD_SELECTOR: &str = ".hover-card";
pub const HOVER_CARD_TRANSITION: &str = "all 0.4s cubic-bezier(0.4, 0, 0.2, 1)";
pub const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;
pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
pub const PAGE_FADE_IN: &str = "opacity 0.3s ease-in";

/// Selector for the in-page target of an `#anchor` link, if it names one
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets_need_an_id() {
        assert_eq!(anchor_target("#features"), Some("#features"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/search"), None);
    }
}
