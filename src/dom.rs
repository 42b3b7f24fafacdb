use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::EnhanceError;

pub fn window() -> Result<Window, EnhanceError> {
    web_sys::window().ok_or(EnhanceError::NoWindow)
}

pub fn document() -> Result<Document, EnhanceError> {
    window()?.document().ok_or(EnhanceError::NoDocument)
}

/// Every element matching `selector`, in document order. An invalid selector
/// matches nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        log::debug!("selector {:?} rejected by the browser", selector);
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.style().set_property(property, value) {
            log::debug!("failed to set {} to {:?}: {:?}", property, value, e);
        }
    }
}
