//! Session state.
//!
//! `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded). The
//! order modal is only ever mutated from event handlers, one at a time.

use ms_order::OrderModal;
use std::cell::RefCell;

use crate::config::StoreConfig;
use crate::dom::ModalElements;

pub struct Storefront {
    pub config: StoreConfig,
    pub modal: OrderModal,
    pub modal_elements: Option<ModalElements>,
}

impl Default for Storefront {
    fn default() -> Self {
        let config = StoreConfig::default();
        Self {
            modal: config.order_modal(),
            config,
            modal_elements: None,
        }
    }
}

thread_local! {
    static STATE: RefCell<Storefront> = RefCell::new(Storefront::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&Storefront) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Storefront) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn config() -> StoreConfig {
    with(|s| s.config.clone())
}

pub fn nav_breakpoint_px() -> u32 {
    with(|s| s.config.nav_breakpoint_px)
}

pub fn resize_debounce_ms() -> u32 {
    with(|s| s.config.resize_debounce_ms)
}

/// Replace the config and rebuild the order modal from it.
pub fn install(config: StoreConfig) {
    let modal = config.order_modal();
    with_mut(|s| {
        s.modal = modal;
        s.config = config;
    });
}

pub fn modal_elements() -> Option<ModalElements> {
    with(|s| s.modal_elements.clone())
}

pub fn set_modal_elements(els: ModalElements) {
    with_mut(|s| s.modal_elements = Some(els));
}
