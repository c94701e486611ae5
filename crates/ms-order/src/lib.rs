//! Order composition for the storefront modal.

mod modal;
mod quantity;

pub use modal::{DismissReason, Effect, ModalEvent, ModalState, ModalView, OrderModal, OrderSelection};
pub use quantity::{MAX_QUANTITY, MIN_QUANTITY, Quantity};

use ms_catalog::{Catalog, Product};

/// Message handed to the messaging app when an order is confirmed.
pub fn compose_order_message(product: &Product, quantity: Quantity, catalog: &Catalog) -> String {
    let currency = catalog.currency();
    let count = quantity.get();
    format!(
        "Hi! I would like to order:\n\n\
         Product: {name}\n\
         Quantity: {quantity}\n\
         Price per {unit}: {price}\n\
         Total amount: {total}\n\n\
         Please confirm availability and delivery details. Thank you!",
        name = product.name,
        quantity = product.quantity_label(count),
        unit = product.unit,
        price = currency.format(u64::from(product.price)),
        total = currency.format(product.total(count)),
    )
}
