use super::{js_error, listen, report, select_all};
use crate::config::UiConfig;
use crate::page::reveal::{REVEAL_CLASS, REVEAL_TARGETS};
use crate::page::scroll::{
    BACK_TO_TOP_CLASS, BACK_TO_TOP_ICON, BACK_TO_TOP_SHOW_CLASS, BACK_TO_TOP_TITLE, HERO_SELECTOR,
};
use crate::page::{
    anchor_target, BackToTop, LoadingTarget, Parallax, RevealOptions, RevealTracker,
    SubmitLoading, ANCHOR_SELECTOR, HOVER_CARD_SELECTOR, HOVER_CARD_TRANSITION, PAGE_FADE_IN,
    TOOLTIP_SELECTOR,
};
use anyhow::{Context, Result};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

pub(super) fn install(window: &Window, document: &Document, config: &UiConfig) -> Result<()> {
    install_reveal(document)?;
    install_anchor_scroll(document)?;
    install_hover_cards(document)?;
    install_parallax(window, document, config)?;
    install_back_to_top(window, document, config)?;
    install_submit_loading(document, config)?;
    init_tooltips(window, document);
    fade_in_body(document);
    Ok(())
}

fn install_reveal(document: &Document) -> Result<()> {
    let options = RevealOptions::default();
    let tracker = Rc::new(RefCell::new(RevealTracker::<Element>::new()));

    let callback = {
        let tracker = Rc::clone(&tracker);
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| (entry.target(), entry.is_intersecting()));
                for target in tracker.borrow_mut().on_entries(entries) {
                    if let Err(err) = target.class_list().add_1(REVEAL_CLASS) {
                        report("Failed to reveal block", &js_error(err));
                    }
                    observer.unobserve(&target);
                }
            },
        )
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(js_error)
            .context("Failed to create intersection observer")?;
    callback.forget();

    for block in select_all(document, REVEAL_TARGETS)? {
        observer.observe(&block);
        tracker.borrow_mut().observe(block);
    }
    Ok(())
}

fn install_anchor_scroll(document: &Document) -> Result<()> {
    for anchor in select_all(document, ANCHOR_SELECTOR)? {
        let document = document.clone();
        let link = anchor.clone();
        listen::<Event>(&anchor, "click", move |event| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            if let Ok(Some(target)) = document.query_selector(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn install_hover_cards(document: &Document) -> Result<()> {
    for card in select_all(document, HOVER_CARD_SELECTOR)? {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };
        let styled = card.clone();
        listen::<Event>(&card, "mouseenter", move |_| {
            let _ = styled.style().set_property("transition", HOVER_CARD_TRANSITION);
        })?;
    }
    Ok(())
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn install_parallax(window: &Window, document: &Document, config: &UiConfig) -> Result<()> {
    let Some(hero) = document
        .query_selector(HERO_SELECTOR)
        .map_err(js_error)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };

    let parallax = Parallax::new(config);
    let scrolled = window.clone();
    listen::<Event>(window, "scroll", move |_| {
        let transform = parallax.transform(scroll_y(&scrolled));
        let _ = hero.style().set_property("transform", &transform);
    })
}

fn install_back_to_top(window: &Window, document: &Document, config: &UiConfig) -> Result<()> {
    let body = document.body().context("Document has no body")?;
    let button = document.create_element("div").map_err(js_error)?;
    button.set_class_name(BACK_TO_TOP_CLASS);
    button.set_inner_html(BACK_TO_TOP_ICON);
    button.set_attribute("title", BACK_TO_TOP_TITLE).map_err(js_error)?;
    body.append_child(&button).map_err(js_error)?;

    let control = Rc::new(RefCell::new(BackToTop::new(config)));

    {
        let control = Rc::clone(&control);
        let scrolled = window.clone();
        let button = button.clone();
        listen::<Event>(window, "scroll", move |_| {
            if let Some(visible) = control.borrow_mut().on_scroll(scroll_y(&scrolled)) {
                let _ = button
                    .class_list()
                    .toggle_with_force(BACK_TO_TOP_SHOW_CLASS, visible);
            }
        })?;
    }

    let scrolled = window.clone();
    listen::<Event>(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(control.borrow().target());
        options.set_behavior(ScrollBehavior::Smooth);
        scrolled.scroll_to_with_scroll_to_options(&options);
    })
}

impl LoadingTarget for HtmlButtonElement {
    fn label(&self) -> String {
        self.inner_html()
    }

    fn set_label(&mut self, label: &str) {
        self.set_inner_html(label);
    }

    fn is_disabled(&self) -> bool {
        self.disabled()
    }

    fn set_disabled(&mut self, disabled: bool) {
        HtmlButtonElement::set_disabled(self, disabled);
    }

    fn opts_out(&self) -> bool {
        self.class_list()
            .contains(crate::page::loading::NO_LOADING_CLASS)
    }
}

fn install_submit_loading(document: &Document, config: &UiConfig) -> Result<()> {
    let loading = SubmitLoading::new(config);
    for form in select_all(document, "form")? {
        let submitted = form.clone();
        listen::<Event>(&form, "submit", move |_| {
            let Some(mut button) = submitted
                .query_selector(r#"button[type="submit"]"#)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            else {
                return;
            };
            if let Some(restore) = loading.on_submit(&mut button) {
                let millis = u32::try_from(restore.after.as_millis()).unwrap_or(u32::MAX);
                Timeout::new(millis, move || restore.apply(&mut button)).forget();
            }
        })?;
    }
    Ok(())
}

/// Initialise Bootstrap tooltips when Bootstrap is loaded on the page
fn init_tooltips(window: &Window, document: &Document) {
    let Ok(bootstrap) = js_sys::Reflect::get(window, &JsValue::from_str("bootstrap")) else {
        return;
    };
    if bootstrap.is_undefined() {
        return;
    }
    let Some(tooltip) = js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Tooltip"))
        .ok()
        .and_then(|ctor| ctor.dyn_into::<js_sys::Function>().ok())
    else {
        return;
    };

    let Ok(triggers) = select_all(document, TOOLTIP_SELECTOR) else {
        return;
    };
    for trigger in triggers {
        if let Err(err) = js_sys::Reflect::construct(&tooltip, &js_sys::Array::of1(&trigger)) {
            report("Failed to initialise tooltip", &js_error(err));
        }
    }
}

fn fade_in_body(document: &Document) {
    let Some(body) = document.body() else {
        return;
    };
    let _ = body.style().set_property("opacity", "0");
    Timeout::new(10, move || {
        let style = body.style();
        let _ = style.set_property("transition", PAGE_FADE_IN);
        let _ = style.set_property("opacity", "1");
    })
    .forget();
}
