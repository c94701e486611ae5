//! Order modal state machine.
//!
//! `Closed` ⇄ `Open(selection)`. Every transition returns the effects the UI
//! layer must apply; the controller itself never touches the DOM.

use ms_catalog::{Catalog, Product, ProductId};
use ms_deeplink::{LinkBuilder, MessageKind};
use tracing::debug;

use crate::Quantity;
use crate::compose_order_message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSelection {
    pub product: ProductId,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OrderSelection),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn selection(&self) -> Option<&OrderSelection> {
        match self {
            Self::Open(selection) => Some(selection),
            Self::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Backdrop,
    Escape,
    Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Open(ProductId),
    ChangeQuantity(i32),
    SetQuantity(String),
    Confirm,
    Close(DismissReason),
}

/// Text and numbers shown in the modal for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub product_name: String,
    pub price_label: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render(ModalView),
    Show,
    Hide,
    LockScroll,
    UnlockScroll,
    /// Open the deep link in a new browsing context.
    Navigate(String),
}

pub struct OrderModal {
    catalog: Catalog,
    links: LinkBuilder,
    state: ModalState,
}

impl OrderModal {
    pub fn new(catalog: Catalog, links: LinkBuilder) -> Self {
        Self {
            catalog,
            links,
            state: ModalState::Closed,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Link for a markup-level enquiry (`"general"`, a product id, ...).
    pub fn enquiry_link(&self, kind: &str, literal: Option<&str>) -> String {
        self.links
            .link(&MessageKind::parse(kind, literal, &self.catalog))
    }

    pub fn handle(&mut self, event: ModalEvent) -> Vec<Effect> {
        match event {
            ModalEvent::Open(id) => self.open(id),
            ModalEvent::ChangeQuantity(delta) => {
                self.update_quantity(|quantity| quantity.adjust(delta))
            }
            ModalEvent::SetQuantity(raw) => self.update_quantity(|_| Quantity::parse(&raw)),
            ModalEvent::Confirm => self.confirm(),
            ModalEvent::Close(reason) => self.close(reason),
        }
    }

    fn open(&mut self, id: ProductId) -> Vec<Effect> {
        let Some(product) = self.catalog.get(id.as_str()) else {
            debug!(product = %id, "ignoring open for unknown product");
            return Vec::new();
        };

        let quantity = Quantity::default();
        let view = self.view(product, quantity);
        debug!(product = %id, "order modal opened");
        self.state = ModalState::Open(OrderSelection {
            product: id,
            quantity,
        });
        vec![Effect::Render(view), Effect::Show, Effect::LockScroll]
    }

    fn update_quantity(&mut self, update: impl FnOnce(Quantity) -> Quantity) -> Vec<Effect> {
        let ModalState::Open(selection) = &mut self.state else {
            return Vec::new();
        };
        selection.quantity = update(selection.quantity);

        let quantity = selection.quantity;
        match self.catalog.get(selection.product.as_str()) {
            Some(product) => vec![Effect::Render(self.view(product, quantity))],
            None => Vec::new(),
        }
    }

    fn confirm(&mut self) -> Vec<Effect> {
        let ModalState::Open(selection) = &self.state else {
            debug!("confirm ignored while modal is closed");
            return Vec::new();
        };

        let mut effects = Vec::with_capacity(3);
        if let Some(product) = self.catalog.get(selection.product.as_str()) {
            let message = compose_order_message(product, selection.quantity, &self.catalog);
            debug!(product = %product.id, quantity = selection.quantity.get(), "order confirmed");
            effects.push(Effect::Navigate(
                self.links.link(&MessageKind::Order(message)),
            ));
        }

        self.state = ModalState::Closed;
        effects.extend([Effect::Hide, Effect::UnlockScroll]);
        effects
    }

    fn close(&mut self, reason: DismissReason) -> Vec<Effect> {
        if !self.state.is_open() {
            return Vec::new();
        }
        debug!(?reason, "order modal closed");
        self.state = ModalState::Closed;
        vec![Effect::Hide, Effect::UnlockScroll]
    }

    fn view(&self, product: &Product, quantity: Quantity) -> ModalView {
        ModalView {
            title: format!("Order {}", product.name),
            image_src: product.image.clone(),
            image_alt: product.name.clone(),
            product_name: product.name.clone(),
            price_label: self.catalog.price_label(product),
            quantity: quantity.get(),
            unit_price: u64::from(product.price),
            total: product.total(quantity.get()),
        }
    }
}

impl Default for OrderModal {
    fn default() -> Self {
        Self::new(Catalog::default(), LinkBuilder::default())
    }
}
