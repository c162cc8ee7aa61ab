use crate::config::UiConfig;
use std::time::Duration;

/// Label shown on a submit button while its form is in flight
pub const LOADING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Loading..."#;
/// Buttons carrying this class keep their label on submit
pub const NO_LOADING_CLASS: &str = "no-loading";

/// A submit button that can show a loading state
pub trait LoadingTarget {
    fn label(&self) -> String;

    fn set_label(&mut self, label: &str);

    fn is_disabled(&self) -> bool;

    fn set_disabled(&mut self, disabled: bool);

    /// Whether the button opted out of the loading state
    fn opts_out(&self) -> bool;
}

/// Puts submit buttons into a loading state on submit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmitLoading {
    fallback: Duration,
}

impl SubmitLoading {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            fallback: config.loading_fallback(),
        }
    }

    /// Swap in the loading label and disable the button. The returned
    /// restore must be applied after its delay whether or not the
    /// submission has finished.
    pub fn on_submit(&self, button: &mut impl LoadingTarget) -> Option<Restore> {
        if button.opts_out() || button.is_disabled() {
            return None;
        }

        let original_label = button.label();
        button.set_label(LOADING_LABEL);
        button.set_disabled(true);

        Some(Restore {
            original_label,
            after: self.fallback,
        })
    }
}

/// Pending restoration of a button's original state
#[derive(Debug, Clone, PartialEq)]
pub struct Restore {
    pub original_label: String,
    pub after: Duration,
}

impl Restore {
    pub fn apply(self, button: &mut impl LoadingTarget) {
        button.set_label(&self.original_label);
        button.set_disabled(false);
    }
}
