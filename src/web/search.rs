use super::{js_error, listen, report};
use crate::config::UiConfig;
use crate::search::elements::{
    ElementLookup, SearchElements, SEARCH_FORM_SELECTOR, SEARCH_INPUT_ID, SUGGESTIONS_ID,
};
use crate::search::render::panel_html;
use crate::search::{Effect, HttpSuggestionSource, Key, Panel, Reaction, SearchController, SearchView};
use anyhow::{anyhow, Context, Result};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    KeyboardEvent, Node, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

const ROW_SELECTOR: &str = ".suggestion-item";

/// Resolves elements in the live document
impl ElementLookup for Document {
    type Element = Element;

    fn find_by_id(&self, id: &str) -> Result<Option<Element>> {
        Ok(self.get_element_by_id(id))
    }

    fn find_by_selector(&self, selector: &str) -> Result<Option<Element>> {
        self.query_selector(selector).map_err(js_error)
    }
}

/// Elements the autocomplete binds to, resolved once at load
#[derive(Debug, Clone)]
pub struct PageElements {
    pub input: HtmlInputElement,
    pub panel: HtmlElement,
    pub form: HtmlFormElement,
    pub town: Option<HtmlSelectElement>,
    pub flat_type: Option<HtmlSelectElement>,
}

impl PageElements {
    /// Fails when the search box, suggestion panel or search form is missing
    pub fn bind(document: &Document) -> Result<Self> {
        let found = SearchElements::bind(document)?;
        Ok(Self {
            input: cast(found.input, SEARCH_INPUT_ID)?,
            panel: cast(found.panel, SUGGESTIONS_ID)?,
            form: cast(found.form, SEARCH_FORM_SELECTOR)?,
            town: found.town.and_then(|e| e.dyn_into().ok()),
            flat_type: found.flat_type.and_then(|e| e.dyn_into().ok()),
        })
    }
}

fn cast<T: JsCast>(element: Element, name: &str) -> Result<T> {
    element
        .dyn_into::<T>()
        .map_err(|_| anyhow!("Element {} has an unexpected type", name))
}

pub(crate) fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// [`SearchView`] over the live page
pub struct DomView {
    window: Window,
    elements: PageElements,
}

impl SearchView for DomView {
    fn render_panel(&mut self, panel: &Panel) {
        let container = &self.elements.panel;
        container.set_inner_html(&panel_html(panel));
        let display = if panel.visible { "block" } else { "none" };
        if let Err(err) = container.style().set_property("display", display) {
            report("Failed to toggle suggestions", &js_error(err));
        }

        if panel.active.is_some() {
            if let Ok(Some(active)) = container.query_selector(".suggestion-item.active") {
                let options = ScrollIntoViewOptions::new();
                options.set_block(ScrollLogicalPosition::Nearest);
                active.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    }

    fn set_query(&mut self, text: &str) {
        self.elements.input.set_value(text);
    }

    fn clear_filters(&mut self) {
        for select in [&self.elements.town, &self.elements.flat_type].into_iter().flatten() {
            select.set_value("");
        }
    }

    fn submit_form(&mut self) {
        if let Err(err) = self.elements.form.submit() {
            report("Failed to submit search form", &js_error(err));
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            report("Failed to open listing", &js_error(err));
        }
    }
}

struct WebSearch {
    controller: SearchController,
    view: DomView,
    source: Rc<HttpSuggestionSource>,
    timer: Option<Timeout>,
}

type Shared = Rc<RefCell<WebSearch>>;

fn dispatch(state: &Shared, event: impl FnOnce(&mut SearchController) -> Reaction) -> bool {
    let mut search = state.borrow_mut();
    let reaction = event(&mut search.controller);
    search.apply(reaction, state)
}

impl WebSearch {
    fn apply(&mut self, reaction: Reaction, state: &Shared) -> bool {
        for effect in reaction.effects {
            match effect {
                Effect::Render => self.view.render_panel(self.controller.panel()),
                Effect::ScheduleQuery { generation, delay } => {
                    let state = Rc::clone(state);
                    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                    // replacing the handle cancels the previous timer
                    self.timer = Some(Timeout::new(millis, move || {
                        dispatch(&state, |c| c.on_debounce_elapsed(generation));
                    }));
                }
                Effect::CancelQuery => self.timer = None,
                Effect::Fetch(ticket) => {
                    let state = Rc::clone(state);
                    let source = Rc::clone(&self.source);
                    spawn_local(async move {
                        let result = source.fetch(&ticket.query).await;
                        if let Err(err) = &result {
                            report("Search error", err);
                        }
                        dispatch(&state, |c| c.on_results(ticket.id, result));
                    });
                }
                Effect::SetQuery(text) => self.view.set_query(&text),
                Effect::ClearFilters => self.view.clear_filters(),
                Effect::SubmitForm => self.view.submit_form(),
                Effect::Navigate(url) => self.view.navigate(&url),
            }
        }
        reaction.prevent_default
    }
}

/// Index of the suggestion row an event happened in
fn row_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let row = target.closest(ROW_SELECTOR).ok()??;
    row.get_attribute("data-index")?.parse().ok()
}

pub(super) fn install(window: &Window, document: &Document, config: &UiConfig) -> Result<()> {
    let elements = PageElements::bind(document)?;
    let source = Rc::new(HttpSuggestionSource::new(config)?);
    let input = elements.input.clone();
    let panel = elements.panel.clone();

    let state: Shared = Rc::new(RefCell::new(WebSearch {
        controller: SearchController::new(config),
        view: DomView {
            window: window.clone(),
            elements,
        },
        source,
        timer: None,
    }));

    {
        let state = Rc::clone(&state);
        let field = input.clone();
        listen::<Event>(&input, "input", move |_| {
            let text = field.value();
            dispatch(&state, |c| c.on_input(&text));
        })?;
    }

    {
        let state = Rc::clone(&state);
        listen::<KeyboardEvent>(&input, "keydown", move |event| {
            let key = Key::from_dom(&event.key());
            if dispatch(&state, |c| c.on_key(key)) {
                event.prevent_default();
            }
        })?;
    }

    {
        let state = Rc::clone(&state);
        let (input, panel) = (input.clone(), panel.clone());
        listen::<Event>(document, "click", move |event| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| input.contains(Some(&node)) || panel.contains(Some(&node)));
            if !inside {
                dispatch(&state, |c| c.on_outside_click());
            }
        })?;
    }

    {
        let state = Rc::clone(&state);
        listen::<Event>(&panel, "click", move |event| {
            if let Some(index) = row_index(&event) {
                dispatch(&state, |c| c.on_row_click(index));
            }
        })?;
    }

    {
        let state = Rc::clone(&state);
        listen::<Event>(&panel, "mouseover", move |event| {
            if let Some(index) = row_index(&event) {
                dispatch(&state, |c| c.on_hover(index));
            }
        })?;
    }

    // exposed for the page's "clear" button
    let clear = Closure::<dyn FnMut()>::new(move || {
        dispatch(&state, |c| c.on_clear());
    });
    js_sys::Reflect::set(window, &JsValue::from_str("clearForm"), clear.as_ref())
        .map_err(js_error)
        .context("Failed to expose clearForm")?;
    clear.forget();

    Ok(())
}
