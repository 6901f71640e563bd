//! Browser DOM Helpers
//!
//! Thin wrappers for the few things the rendered page needs from the real DOM:
//! layout measurement, smooth scrolling, script injection and inline config.

use board_core::Layout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

/// Id of an optional `<script type="application/json">` carrying board config
pub const INLINE_CONFIG_ID: &str = "board-config";

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn html_element(id: &str) -> Option<HtmlElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Offsets of the rendered element plus its parent's scroll position
pub fn measure(id: &str) -> Option<Layout> {
    let element = html_element(id)?;
    let parent_scroll_top = element
        .parent_element()
        .map(|parent| f64::from(parent.scroll_top()))
        .unwrap_or_default();
    Some(Layout {
        offset_left: f64::from(element.offset_left()),
        offset_top: f64::from(element.offset_top()),
        offset_height: f64::from(element.offset_height()),
        parent_scroll_top,
    })
}

pub fn scroll_into_view(id: &str) {
    let Some(element) = html_element(id) else {
        log::warn!("cannot scroll to #{id}: not rendered");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Append a `<script src=..>` to `<head>`; nothing waits for it to load
pub fn load_script(src: &str) -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let head = document.head().ok_or_else(|| JsValue::from_str("no <head>"))?;
    let script = document.create_element("script")?;
    script.set_attribute("src", src)?;
    head.append_child(&script)?;
    Ok(())
}

/// Text of the inline config element, if the page has one
pub fn inline_config() -> Option<String> {
    document()?
        .get_element_by_id(INLINE_CONFIG_ID)?
        .text_content()
        .filter(|text| !text.trim().is_empty())
}
