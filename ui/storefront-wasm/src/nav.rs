//! Mobile navigation toggle.
//!
//! Open/closed lives in the `active` class on `.menu-toggle` and `.nav-links`
//! (plus `menu-open` on `<body>`). The menu closes on a nav-link click, a click
//! outside the menu, or once the viewport is wider than the configured
//! breakpoint.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, MouseEvent};

use crate::dom;
use crate::events::listen;
use crate::state;

#[derive(Clone)]
struct NavElements {
    toggle: Element,
    links: Element,
}

impl NavElements {
    fn is_open(&self) -> bool {
        dom::has_class(&self.links, "active")
    }

    fn set_open(&self, open: bool) {
        dom::toggle_class(&self.toggle, "active", open);
        dom::toggle_class(&self.links, "active", open);
        dom::toggle_class(&dom::body(), "menu-open", open);
    }
}

/// True when `viewport_width` is past the mobile layout.
pub fn collapses(viewport_width: f64, breakpoint_px: u32) -> bool {
    viewport_width > f64::from(breakpoint_px)
}

/// Coalesces bursts of calls into one, run after a quiet period.
#[derive(Clone, Default)]
pub struct Debouncer {
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn call(&self, wait_ms: u32, f: impl FnOnce() + 'static) {
        // dropping the previous timeout cancels it
        *self.pending.borrow_mut() = Some(Timeout::new(wait_ms, f));
    }
}

/// Wire the mobile menu. Pages without `.menu-toggle` are left alone.
pub fn bind() -> Result<(), JsValue> {
    let (Some(toggle), Some(links)) = (dom::query(".menu-toggle"), dom::query(".nav-links")) else {
        return Ok(());
    };
    let nav = NavElements { toggle, links };

    {
        let nav2 = nav.clone();
        listen(&nav.toggle, "click", move |e: MouseEvent| {
            e.stop_propagation();
            nav2.set_open(!nav2.is_open());
        })?;
    }

    for link in dom::query_all(".nav-link") {
        let nav2 = nav.clone();
        listen(&link, "click", move |_: MouseEvent| nav2.set_open(false))?;
    }

    {
        let nav2 = nav.clone();
        listen(&dom::document(), "click", move |e: MouseEvent| {
            let inside = dom::closest_from_event(&e, ".nav-links").is_some()
                || dom::closest_from_event(&e, ".menu-toggle").is_some();
            if !inside && nav2.is_open() {
                nav2.set_open(false);
            }
        })?;
    }

    {
        let nav2 = nav.clone();
        let debouncer = Debouncer::default();
        listen(&dom::window(), "resize", move |_: Event| {
            let nav3 = nav2.clone();
            debouncer.call(state::resize_debounce_ms(), move || {
                let width = dom::window()
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or_default();
                if collapses(width, state::nav_breakpoint_px()) {
                    nav3.set_open(false);
                }
            });
        })?;
    }

    dom::add_class(&dom::body(), "has-mobile-menu");
    Ok(())
}
