//! Order modal adapter.
//!
//! Feeds host events into [`ms_order::OrderModal`] and applies the returned
//! effects to the modal markup.

use ms_order::{Effect, ModalEvent, ModalView};
use tracing::{debug, warn};

use crate::dom::{self, ModalElements};
use crate::state;

/// Run one modal event. Ignored when the page has no modal markup.
pub fn dispatch(event: ModalEvent) {
    let Some(els) = state::modal_elements() else {
        debug!(?event, "no order modal on this page");
        return;
    };
    let effects = state::with_mut(|s| s.modal.handle(event));
    for effect in effects {
        apply(&els, effect);
    }
}

/// Open an enquiry link for a markup kind (`"general"`, a product id, `"order"`).
pub fn open_enquiry(kind: &str, literal: Option<&str>) {
    let url = state::with(|s| s.modal.enquiry_link(kind, literal));
    open_link(&url);
}

pub fn open_link(url: &str) {
    match dom::window().open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => debug!(%url, "opened messaging link"),
        Ok(None) => warn!("messaging link blocked by the browser"),
        Err(err) => warn!(?err, "failed to open messaging link"),
    }
}

fn apply(els: &ModalElements, effect: Effect) {
    match effect {
        Effect::Render(view) => render(els, &view),
        Effect::Show => dom::add_class(&els.modal, "active"),
        Effect::Hide => dom::remove_class(&els.modal, "active"),
        Effect::LockScroll => {
            let _ = dom::body().style().set_property("overflow", "hidden");
        }
        Effect::UnlockScroll => {
            let _ = dom::body().style().remove_property("overflow");
        }
        Effect::Navigate(url) => open_link(&url),
    }
}

fn render(els: &ModalElements, view: &ModalView) {
    dom::set_text(&els.title, &view.title);
    els.image.set_src(&view.image_src);
    els.image.set_alt(&view.image_alt);
    dom::set_text(&els.product_name, &view.product_name);
    dom::set_text(&els.product_price, &view.price_label);
    els.quantity.set_value(&view.quantity.to_string());
    // the markup carries the currency symbol in front of #totalPrice
    dom::set_text(&els.total, &view.total.to_string());
}
