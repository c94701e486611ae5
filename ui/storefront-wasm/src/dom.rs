//! DOM helpers and element bindings.
//!
//! Modal fields are resolved once, after `DOMContentLoaded`. Everything else is
//! queried where it is used.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn body() -> HtmlElement {
    gloo_utils::body()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

/// First match for `selector`; invalid selectors count as no match.
pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nl) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest_from_event(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok()?
}

// ── Modal bindings ──

/// Hooks for the product order modal.
#[derive(Clone)]
pub struct ModalElements {
    pub modal: Element,
    pub title: Element,
    pub image: HtmlImageElement,
    pub product_name: Element,
    pub product_price: Element,
    pub quantity: HtmlInputElement,
    pub total: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id).ok_or_else(|| {
            JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id))
        })?
    };
}

impl ModalElements {
    pub fn bind() -> Result<ModalElements, JsValue> {
        Ok(ModalElements {
            modal: get_el!("productModal"),
            title: get_el!("modalTitle"),
            image: get_typed!(HtmlImageElement, "modalImage"),
            product_name: get_el!("modalProductName"),
            product_price: get_el!("modalProductPrice"),
            quantity: get_typed!(HtmlInputElement, "quantity"),
            total: get_el!("totalPrice"),
        })
    }
}
