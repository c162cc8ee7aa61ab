use super::search::optional;
use super::{js_error, listen, report};
use crate::config::UiConfig;
use crate::models::SearchPreferences;
use crate::prefs::{load_preferences, save_preferences, PreferenceStore};
use crate::search::elements::{FLAT_TYPE_SELECT_ID, SEARCH_FORM_SELECTOR, TOWN_SELECT_ID};
use anyhow::{Context, Result};
use web_sys::{Document, Event, HtmlSelectElement, Storage, Window};

/// The browser's `localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage(Storage);

impl LocalStorage {
    pub fn open(window: &Window) -> Result<Self> {
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .context("localStorage is unavailable")?;
        Ok(Self(storage))
    }
}

impl PreferenceStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.0.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.set_item(key, value).map_err(js_error)
    }
}

/// Prefill the filter selects from storage and save them on every search
pub(super) fn install(window: &Window, document: &Document, config: &UiConfig) -> Result<()> {
    let store = LocalStorage::open(window)?;
    let town = optional::<HtmlSelectElement>(document, TOWN_SELECT_ID);
    let flat_type = optional::<HtmlSelectElement>(document, FLAT_TYPE_SELECT_ID);

    let prefs = load_preferences(&store, &config.preferences_key);
    if let (Some(select), Some(value)) = (&town, prefs.town()) {
        select.set_value(value);
    }
    if let (Some(select), Some(value)) = (&flat_type, prefs.flat_type()) {
        select.set_value(value);
    }

    let Some(form) = document.query_selector(SEARCH_FORM_SELECTOR).map_err(js_error)? else {
        return Ok(());
    };

    let key = config.preferences_key.clone();
    let mut store = store;
    listen::<Event>(&form, "submit", move |_| {
        let prefs = SearchPreferences::from_form(
            town.as_ref().map(|s| s.value()).as_deref(),
            flat_type.as_ref().map(|s| s.value()).as_deref(),
        );
        if let Err(err) = save_preferences(&mut store, &key, &prefs) {
            report("Error saving search preferences", &err);
        }
    })
}
