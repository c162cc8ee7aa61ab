use crate::models::Suggestion;
use crate::search::types::Panel;
use anyhow::Result;
use async_trait::async_trait;

/// Anything that can answer a partial search query with suggestions
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Fetch suggestions for an already trimmed query
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>>;

    /// Get the name of the suggestion source
    fn source_name(&self) -> &'static str;
}

/// The page elements the search controller drives
pub trait SearchView {
    /// Replace the panel's contents and visibility
    fn render_panel(&mut self, panel: &Panel);

    /// Overwrite the search box text
    fn set_query(&mut self, text: &str);

    /// Reset the town and flat type selects
    fn clear_filters(&mut self);

    /// Submit the enclosing search form
    fn submit_form(&mut self);

    /// Leave the page for another URL
    fn navigate(&mut self, url: &str);
}
