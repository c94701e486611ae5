//! Event binding.
//!
//! Markup actions are dispatched from one delegated `click` listener on the
//! document:
//!
//! - `data-product="<id>"` opens the order modal
//! - `data-whatsapp="<kind>"` opens an enquiry link
//! - `data-quantity="<delta>"` adjusts the quantity
//! - `data-action="confirm-order" | "close-modal"`

use ms_catalog::ProductId;
use ms_order::{DismissReason, ModalEvent};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::dom::{self, ModalElements};
use crate::modal;

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Same as [`listen`], registered for the capturing phase.
pub fn listen_capture<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_capture(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &opts,
    )?;
    cb.forget();
    Ok(())
}

/// Markup action resolved from a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenProduct(String),
    Enquire(String),
    ChangeQuantity(i32),
    ConfirmOrder,
    CloseModal,
}

impl Action {
    /// Interpret a `data-*` attribute; `None` for values that mean nothing.
    pub fn from_attribute(name: &str, value: &str) -> Option<Action> {
        let value = value.trim();
        match name {
            "data-product" if !value.is_empty() => Some(Action::OpenProduct(value.to_owned())),
            "data-whatsapp" => Some(Action::Enquire(value.to_owned())),
            "data-quantity" => value.parse().ok().map(Action::ChangeQuantity),
            "data-action" => match value {
                "confirm-order" => Some(Action::ConfirmOrder),
                "close-modal" => Some(Action::CloseModal),
                _ => None,
            },
            _ => None,
        }
    }

    fn run(self) {
        match self {
            Action::OpenProduct(id) => modal::dispatch(ModalEvent::Open(ProductId(id))),
            Action::Enquire(kind) => modal::open_enquiry(&kind, None),
            Action::ChangeQuantity(delta) => modal::dispatch(ModalEvent::ChangeQuantity(delta)),
            Action::ConfirmOrder => modal::dispatch(ModalEvent::Confirm),
            Action::CloseModal => modal::dispatch(ModalEvent::Close(DismissReason::Button)),
        }
    }
}

/// Elements the browser already clicks on `Enter`.
fn activates_natively(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "A" | "BUTTON" | "INPUT" | "SELECT" | "TEXTAREA"
    )
}

const ACTION_ATTRIBUTES: [&str; 4] = ["data-product", "data-whatsapp", "data-quantity", "data-action"];

/// Action of the innermost element in `ancestry` carrying an action attribute.
///
/// `ancestry` runs from the click target outwards. Only that element decides,
/// so a button nested in a product card triggers the button's action.
fn nearest_action<T>(
    ancestry: impl IntoIterator<Item = T>,
    attribute: impl Fn(&T, &str) -> Option<String>,
) -> Option<Action> {
    let (name, value) = ancestry.into_iter().find_map(|el| {
        ACTION_ATTRIBUTES
            .iter()
            .find_map(|name| attribute(&el, name).map(|value| (*name, value)))
    })?;
    let action = Action::from_attribute(name, &value);
    if action.is_none() {
        warn!(attribute = name, value = %value, "ignoring unrecognised markup action");
    }
    action
}

fn action_for(target: &Element) -> Option<Action> {
    let ancestry = std::iter::successors(Some(target.clone()), |el| el.parent_element());
    nearest_action(ancestry, |el, name| el.get_attribute(name))
}

/// Bind document-level listeners. Call once after `DOMContentLoaded`.
pub fn bind_events(modal_els: Option<&ModalElements>) -> Result<(), JsValue> {
    let document = dom::document();

    // ── Delegated markup actions ──
    listen(&document, "click", |e: Event| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Some(action) = action_for(&target) {
            e.prevent_default();
            action.run();
        }
    })?;

    // ── Keyboard ──
    listen(&document, "keydown", |e: KeyboardEvent| match e.key().as_str() {
        "Escape" => modal::dispatch(ModalEvent::Close(DismissReason::Escape)),
        "Enter" => {
            if let Some(button) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                .filter(|el| dom::has_class(el, "btn") && !activates_natively(&el.tag_name()))
            {
                button.click();
            }
        }
        _ => {}
    })?;

    let Some(els) = modal_els else {
        return Ok(());
    };

    // ── Modal backdrop ──
    let backdrop = els.modal.clone();
    listen(&els.modal, "click", move |e: Event| {
        let on_backdrop = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|t| t == backdrop);
        if on_backdrop {
            modal::dispatch(ModalEvent::Close(DismissReason::Backdrop));
        }
    })?;

    // ── Typed quantity ──
    let input = els.quantity.clone();
    listen(&els.quantity, "change", move |_: Event| {
        modal::dispatch(ModalEvent::SetQuantity(input.value()));
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_attributes_map_to_actions() {
        assert_eq!(
            Action::from_attribute("data-product", " honey "),
            Some(Action::OpenProduct("honey".to_owned()))
        );
        assert_eq!(Action::from_attribute("data-product", ""), None);
        assert_eq!(
            Action::from_attribute("data-whatsapp", "general"),
            Some(Action::Enquire("general".to_owned()))
        );
        assert_eq!(
            Action::from_attribute("data-quantity", "-1"),
            Some(Action::ChangeQuantity(-1))
        );
        assert_eq!(Action::from_attribute("data-quantity", "more"), None);
        assert_eq!(
            Action::from_attribute("data-action", "confirm-order"),
            Some(Action::ConfirmOrder)
        );
        assert_eq!(
            Action::from_attribute("data-action", "close-modal"),
            Some(Action::CloseModal)
        );
        assert_eq!(Action::from_attribute("data-action", "checkout"), None);
    }

    type Markup = &'static [(&'static str, &'static str)];

    fn attribute(el: &Markup, name: &str) -> Option<String> {
        el.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_owned())
    }

    #[test]
    fn innermost_action_wins() {
        let card: Markup = &[("class", "product-card"), ("data-product", "honey")];
        let enquire: Markup = &[("data-whatsapp", "honey")];
        let label: Markup = &[("class", "btn-label")];

        assert_eq!(
            nearest_action([label, enquire, card], attribute),
            Some(Action::Enquire("honey".to_owned()))
        );
        assert_eq!(
            nearest_action([label, card], attribute),
            Some(Action::OpenProduct("honey".to_owned()))
        );
        assert_eq!(nearest_action([label], attribute), None);
    }

    #[test]
    fn unrecognised_inner_action_does_not_fall_through() {
        let card: Markup = &[("data-product", "honey")];
        let checkout: Markup = &[("data-action", "checkout")];
        assert_eq!(nearest_action([checkout, card], attribute), None);
    }

    #[test]
    fn enter_skips_natively_activated_elements() {
        assert!(activates_natively("BUTTON"));
        assert!(activates_natively("a"));
        assert!(!activates_natively("DIV"));
        assert!(!activates_natively("SPAN"));
    }
}
