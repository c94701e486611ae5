//! Image preloading and load-failure reporting.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement};

use crate::dom;
use crate::events::listen_capture;

/// Append `<link rel="preload" as="image">` for each critical image.
pub fn preload_images(urls: &[String]) -> Result<(), JsValue> {
    let head = gloo_utils::head();
    for url in urls.iter().filter(|u| !u.trim().is_empty()) {
        let link = dom::document().create_element("link")?;
        link.set_attribute("rel", "preload")?;
        link.set_attribute("as", "image")?;
        link.set_attribute("href", url)?;
        head.append_child(&link)?;
    }
    Ok(())
}

/// Image `error` events don't bubble, so listen on the capture phase.
pub fn bind_image_error_reporting() -> Result<(), JsValue> {
    listen_capture(&dom::document(), "error", |e: Event| {
        if let Some(img) = e.target().and_then(|t| t.dyn_into::<HtmlImageElement>().ok()) {
            gloo_console::warn!("Image failed to load:", img.src());
        }
    })
}
