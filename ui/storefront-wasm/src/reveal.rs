//! Lazy image reveal and fade-in-on-scroll.
//!
//! Both are one-shot: an element is unobserved as soon as it has been handled.
//! Browsers without `IntersectionObserver` get neither.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::dom;

const FADE_THRESHOLD: f64 = 0.1;
const FADE_ROOT_MARGIN: &str = "0px 0px -50px 0px";

fn supported() -> bool {
    js_sys::Reflect::has(&dom::window(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// Observe `targets`, calling `on_visible` once per element when it intersects.
fn observe_once(
    targets: &[Element],
    init: Option<&IntersectionObserverInit>,
    on_visible: impl Fn(&Element) + 'static,
) -> Result<(), JsValue> {
    if targets.is_empty() || !supported() {
        return Ok(());
    }

    let cb = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                let target = entry.target();
                on_visible(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = match init {
        Some(init) => IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), init)?,
        None => IntersectionObserver::new(cb.as_ref().unchecked_ref())?,
    };
    cb.forget();

    for target in targets {
        observer.observe(target);
    }
    Ok(())
}

/// `img[loading="lazy"]`: swap in `data-src` and drop the `lazy` class.
pub fn observe_lazy_images() -> Result<(), JsValue> {
    let images = dom::query_all(r#"img[loading="lazy"]"#);
    observe_once(&images, None, |el| {
        if let Some(img) = el.dyn_ref::<HtmlImageElement>() {
            if let Some(src) = img.get_attribute("data-src").filter(|s| !s.is_empty()) {
                img.set_src(&src);
            }
        }
        dom::remove_class(el, "lazy");
    })
}

pub fn observe_fade_ins() -> Result<(), JsValue> {
    let targets = dom::query_all(".product-card, .process-step");
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(FADE_THRESHOLD));
    init.set_root_margin(FADE_ROOT_MARGIN);
    observe_once(&targets, Some(&init), |el| dom::add_class(el, "fade-in"))
}
