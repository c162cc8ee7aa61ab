//! Browser entry point.
//!
//! Binds the search controller, page affordances and preference storage to
//! the live DOM once the document has loaded.

mod page;
mod search;
mod storage;

pub use search::{DomView, PageElements};
pub use storage::LocalStorage;

use crate::config::UiConfig;
use crate::search::render::alert_html;
use anyhow::{anyhow, Context, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Window has no document"))?;

    if document.ready_state() == "loading" {
        let loaded = window.clone();
        listen::<Event>(&document, "DOMContentLoaded", move |_| boot(&loaded))
            .map_err(|err| JsValue::from_str(&format!("{:#}", err)))?;
    } else {
        boot(&window);
    }
    Ok(())
}

#[wasm_bindgen(js_name = formatPrice)]
pub fn format_price(price: f64) -> String {
    crate::format::format_price(price)
}

#[wasm_bindgen(js_name = formatPricePerSqm)]
pub fn format_price_per_sqm(price: f64, area: f64) -> Option<String> {
    crate::format::format_price_per_sqm(price, area)
}

/// Prepend a dismissible error alert to `container`, or to `main.container`
#[wasm_bindgen(js_name = showError)]
pub fn show_error(message: &str, container: Option<Element>) -> Result<(), JsValue> {
    let container = match container {
        Some(container) => container,
        None => {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("Window has no document"))?;
            match document.query_selector("main.container")? {
                Some(main) => main,
                None => return Ok(()),
            }
        }
    };
    let html = alert_html(message) + &container.inner_html();
    container.set_inner_html(&html);
    Ok(())
}

fn boot(window: &Window) {
    if let Err(err) = try_boot(window) {
        report("Failed to initialise page scripts", &err);
    }
}

fn try_boot(window: &Window) -> Result<()> {
    let document = window.document().context("Window has no document")?;
    let config = UiConfig {
        base_url: window.location().origin().map_err(js_error)?,
        ..UiConfig::default()
    };

    page::install(window, &document, &config)?;
    storage::install(window, &document, &config)?;

    if let Err(err) = search::install(window, &document, &config) {
        report("Search autocomplete disabled", &err);
    }
    Ok(())
}

/// Attach `handler` for `event` on `target` for the lifetime of the page
pub(crate) fn listen<E>(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) -> Result<()>
where
    E: JsCast + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)
        .with_context(|| format!("Failed to listen for {}", event))?;
    closure.forget();
    Ok(())
}

pub(crate) fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) fn js_error(value: JsValue) -> anyhow::Error {
    match value.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{:?}", value),
    }
}

pub(crate) fn report(context: &str, err: &anyhow::Error) {
    tracing::warn!("{}: {:#}", context, err);
    web_sys::console::error_2(
        &JsValue::from_str(context),
        &JsValue::from_str(&format!("{:#}", err)),
    );
}
