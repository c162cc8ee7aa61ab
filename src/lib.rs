pub mod config;
pub mod format;
pub mod models;
pub mod page;
pub mod prefs;
pub mod search;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::UiConfig;
pub use models::{SearchPreferences, Suggestion};
