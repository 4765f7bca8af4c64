//! Page wiring around the backdrop: reveal animations and buttons.
//!
//! Each piece looks up its elements once and quietly skips anything the
//! page does not have.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions,
};

/// Class that triggers the CSS reveal transition.
const VISIBLE_CLASS: &str = "visible";

/// Fraction of a `.scroll-trigger` element that must be on screen.
const SCROLL_REVEAL_THRESHOLD: f64 = 0.15;

/// Reveal the hero, start scroll reveals, and hook up the buttons.
///
/// `#finalContactBtn` opens a mail draft to `contact_email`.
#[wasm_bindgen]
pub fn wire_page(contact_email: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;

    reveal_hero(&document)?;
    observe_scroll_triggers(&document)?;
    scroll_on_click(&document, "viewProjectsBtn", "projects")?;
    scroll_on_click(&document, "contactBtn", "contactSection")?;
    mailto_on_click(&document, "finalContactBtn", contact_email)?;

    tracing::debug!("page wired");
    Ok(())
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn reveal_hero(document: &Document) -> Result<(), JsValue> {
    for element in elements(document, ".anim-hidden")? {
        element.class_list().add_1(VISIBLE_CLASS)?;
    }
    Ok(())
}

fn observe_scroll_triggers(document: &Document) -> Result<(), JsValue> {
    let targets = elements(document, ".scroll-trigger")?;
    if targets.is_empty() {
        return Ok(());
    }

    let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    if let Err(e) = entry.target().class_list().add_1(VISIBLE_CLASS) {
                        tracing::warn!(error = ?e, "could not reveal scroll target");
                    }
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(SCROLL_REVEAL_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();

    for target in &targets {
        observer.observe(target);
    }
    Ok(())
}

fn on_click(element: &Element, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut()>::new(handler);
    element.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn scroll_on_click(document: &Document, button_id: &str, target_id: &'static str) -> Result<(), JsValue> {
    let Some(button) = document.get_element_by_id(button_id) else {
        return Ok(());
    };
    let document = document.clone();
    on_click(&button, move || {
        if let Some(target) = document.get_element_by_id(target_id) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }
    })
}

fn mailto_on_click(document: &Document, button_id: &str, address: &str) -> Result<(), JsValue> {
    let Some(button) = document.get_element_by_id(button_id) else {
        return Ok(());
    };
    let href = format!("mailto:{}", address);
    on_click(&button, move || {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(&href) {
                tracing::warn!(error = ?e, "could not open mail client");
            }
        }
    })
}
