//! Malenadu Savi storefront WASM frontend
//!
//! Wires the page's DOM to the order modal, messaging deep links and the
//! passive scroll/navigation behaviours. Each concern lives in its own module.

pub mod assets;
pub mod config;
pub mod dom;
pub mod events;
pub mod logging;
pub mod modal;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod state;

use ms_catalog::ProductId;
use ms_order::{DismissReason, ModalEvent};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

const BANNER: &str = "\
🍯 Malenadu Savi Website
========================
Customise via <script type=\"application/json\" id=\"storeConfig\"> or configure({...}):
phone_number, messaging_endpoint, products, nav_breakpoint_px.";

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let defaults = config::StoreConfig::default();
    let loaded = config::load_inline(&defaults);
    let config = loaded.as_ref().unwrap_or(&defaults).clone();
    logging::init(&config.log_level);
    if let Err(err) = &loaded {
        warn!(%err, "ignoring inline store config");
    }

    assets::preload_images(&config.preload_images)?;
    assets::bind_image_error_reporting()?;
    state::install(config);

    if dom::document().ready_state() == "loading" {
        events::listen(&dom::document(), "DOMContentLoaded", |_: web_sys::Event| {
            if let Err(err) = init() {
                warn!(?err, "storefront initialisation failed");
            }
        })
    } else {
        init()
    }
}

/// Page initialisation sequence, once the DOM is parsed.
fn init() -> Result<(), JsValue> {
    let modal_els = match dom::ModalElements::bind() {
        Ok(els) => {
            state::set_modal_elements(els.clone());
            Some(els)
        }
        Err(err) => {
            warn!(?err, "order modal disabled");
            None
        }
    };

    reveal::observe_lazy_images()?;
    reveal::observe_fade_ins()?;
    nav::bind()?;
    scroll::bind_smooth_scrolling()?;
    events::bind_events(modal_els.as_ref())?;

    gloo_console::log!(BANNER);
    info!("storefront ready");
    Ok(())
}

// ── JS surface for inline handlers in the markup ──

/// Merge settings over the current config. Closes an open order first.
#[wasm_bindgen]
pub fn configure(overlay: JsValue) -> Result<(), JsValue> {
    let current = state::config();
    let next = config::from_js(&current, overlay)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    modal::dispatch(ModalEvent::Close(DismissReason::Button));
    let new_images: Vec<String> = next
        .preload_images
        .iter()
        .filter(|url| !current.preload_images.contains(url))
        .cloned()
        .collect();
    assets::preload_images(&new_images)?;
    state::install(next);
    Ok(())
}

#[wasm_bindgen(js_name = openProductModal)]
pub fn open_product_modal(product: &str) {
    modal::dispatch(ModalEvent::Open(ProductId::from(product)));
}

#[wasm_bindgen(js_name = closeProductModal)]
pub fn close_product_modal() {
    modal::dispatch(ModalEvent::Close(DismissReason::Button));
}

#[wasm_bindgen(js_name = changeQuantity)]
pub fn change_quantity(delta: i32) {
    modal::dispatch(ModalEvent::ChangeQuantity(delta));
}

#[wasm_bindgen(js_name = confirmOrder)]
pub fn confirm_order() {
    modal::dispatch(ModalEvent::Confirm);
}

#[wasm_bindgen(js_name = openWhatsApp)]
pub fn open_whatsapp(kind: &str, message: Option<String>) {
    modal::open_enquiry(kind, message.as_deref());
}
