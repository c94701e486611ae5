//! Smooth scrolling for in-page anchors, offset by the fixed header.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::events::listen;

/// Selector for an anchor's fragment target; a bare `#` has none.
pub fn fragment_selector(href: &str) -> Option<&str> {
    let href = href.trim();
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

pub fn scroll_top(target_offset: i32, header_height: i32) -> f64 {
    f64::from(target_offset.saturating_sub(header_height))
}

fn scroll_to(selector: &str) {
    let Some(target) = dom::query(selector).and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return;
    };
    let header_height = dom::query(".header")
        .and_then(|h| h.dyn_into::<HtmlElement>().ok())
        .map(|h| h.offset_height())
        .unwrap_or_default();

    let opts = ScrollToOptions::new();
    opts.set_top(scroll_top(target.offset_top(), header_height));
    opts.set_behavior(ScrollBehavior::Smooth);
    dom::window().scroll_to_with_scroll_to_options(&opts);
}

pub fn bind_smooth_scrolling() -> Result<(), JsValue> {
    for anchor in dom::query_all(r##"a[href^="#"]"##) {
        let href = anchor.get_attribute("href").unwrap_or_default();
        listen(&anchor, "click", move |e: MouseEvent| {
            e.prevent_default();
            if let Some(selector) = fragment_selector(&href) {
                scroll_to(selector);
            }
        })?;
    }
    Ok(())
}
