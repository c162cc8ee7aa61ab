pub mod client;
pub mod controller;
pub mod elements;
pub mod render;
#[cfg(not(target_arch = "wasm32"))]
pub mod session;
pub mod traits;
pub mod types;

pub use client::HttpSuggestionSource;
pub use controller::SearchController;
pub use elements::{ElementLookup, SearchElements};
#[cfg(not(target_arch = "wasm32"))]
pub use session::{SearchSession, UiEvent};
pub use traits::{SearchView, SuggestionSource};
pub use types::{Effect, Key, Panel, PanelContent, Reaction, SuggestionRow};
