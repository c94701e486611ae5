//! Storefront configuration.
//!
//! Layers, later wins: compiled defaults, the inline
//! `<script type="application/json" id="storeConfig">` block, then any
//! `configure()` call from JS. A layer that fails to parse is skipped.

use ms_catalog::{Catalog, Currency, DEFAULT_CURRENCY_SYMBOL, Product};
use ms_deeplink::{DEFAULT_ENDPOINT, DEFAULT_PHONE_NUMBER, LinkBuilder, LinkConfig};
use ms_order::OrderModal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::dom;

pub const INLINE_CONFIG_ID: &str = "storeConfig";

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?ixlib=rb-4.0.3&auto=format&fit=crop&w=2070&q=80";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config value rejected: {0}")]
    Js(String),
    #[error("config must be a JSON object")]
    NotAnObject,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub messaging_endpoint: String,
    pub phone_number: String,
    pub currency_symbol: String,
    /// Viewport width above which the mobile menu is forced closed.
    pub nav_breakpoint_px: u32,
    pub resize_debounce_ms: u32,
    pub preload_images: Vec<String>,
    /// Replaces the built-in catalog when present and valid.
    pub products: Option<Vec<Product>>,
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            messaging_endpoint: DEFAULT_ENDPOINT.to_owned(),
            phone_number: DEFAULT_PHONE_NUMBER.to_owned(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
            nav_breakpoint_px: 1023,
            resize_debounce_ms: 250,
            preload_images: vec![HERO_IMAGE.to_owned()],
            products: None,
            log_level: "info".to_owned(),
        }
    }
}

impl StoreConfig {
    /// Apply a partial JSON object on top of this config.
    pub fn merged(&self, overlay: Value) -> Result<StoreConfig, ConfigError> {
        let Value::Object(fields) = overlay else {
            return Err(ConfigError::NotAnObject);
        };
        let mut base = serde_json::to_value(self)?;
        if let Value::Object(target) = &mut base {
            target.extend(fields);
        }
        Ok(serde_json::from_value(base)?)
    }

    pub fn merged_str(&self, raw: &str) -> Result<StoreConfig, ConfigError> {
        self.merged(serde_json::from_str(raw)?)
    }

    pub fn link_config(&self) -> LinkConfig {
        LinkConfig {
            endpoint: self.messaging_endpoint.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    pub fn catalog(&self) -> Catalog {
        let catalog = match &self.products {
            Some(products) => Catalog::new(products.clone()).unwrap_or_else(|err| {
                warn!(%err, "invalid product catalog, using built-in products");
                Catalog::default()
            }),
            None => Catalog::default(),
        };
        catalog.with_currency(Currency::new(self.currency_symbol.as_str()))
    }

    pub fn link_builder(&self) -> LinkBuilder {
        LinkBuilder::new(&self.link_config()).unwrap_or_else(|err| {
            warn!(%err, "invalid messaging settings, using defaults");
            LinkBuilder::default()
        })
    }

    pub fn order_modal(&self) -> OrderModal {
        OrderModal::new(self.catalog(), self.link_builder())
    }
}

/// Read the inline JSON block, if the page has one.
pub fn load_inline(base: &StoreConfig) -> Result<StoreConfig, ConfigError> {
    let raw = dom::by_id(INLINE_CONFIG_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(base.clone());
    }
    base.merged_str(&raw)
}

/// Apply a JS object passed to `configure()`.
pub fn from_js(base: &StoreConfig, value: wasm_bindgen::JsValue) -> Result<StoreConfig, ConfigError> {
    let overlay: Value =
        serde_wasm_bindgen::from_value(value).map_err(|err| ConfigError::Js(err.to_string()))?;
    base.merged(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_order::{Effect, ModalEvent};

    #[test]
    fn defaults_match_storefront() {
        let config = StoreConfig::default();
        assert_eq!(config.nav_breakpoint_px, 1023);
        assert_eq!(config.resize_debounce_ms, 250);
        assert_eq!(config.link_builder().destination(), "918088653820");
        assert_eq!(config.catalog().products().len(), 2);
    }

    #[test]
    fn overlay_replaces_only_given_fields() -> anyhow::Result<()> {
        let config = StoreConfig::default()
            .merged_str(r#"{"phone_number":"+1 (555) 010-0200","nav_breakpoint_px":768}"#)?;
        assert_eq!(config.nav_breakpoint_px, 768);
        assert_eq!(config.resize_debounce_ms, 250);
        assert_eq!(config.link_builder().destination(), "15550100200");

        let later = config.merged_str(r#"{"resize_debounce_ms":100}"#)?;
        assert_eq!(later.nav_breakpoint_px, 768);
        assert_eq!(later.resize_debounce_ms, 100);
        Ok(())
    }

    #[test]
    fn rejects_malformed_layers() {
        let base = StoreConfig::default();
        assert!(matches!(base.merged_str("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(base.merged_str("[1]"), Err(ConfigError::NotAnObject)));
        assert!(matches!(
            base.merged_str(r#"{"nav_breakpoint_px":"wide"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_settings_fall_back_to_defaults() -> anyhow::Result<()> {
        let config = StoreConfig::default().merged_str(
            r#"{"phone_number":"n/a","products":[{"id":"ghee","name":"Ghee","price":0,"image":"g.jpg"}]}"#,
        )?;
        assert_eq!(config.link_builder().destination(), "918088653820");
        assert!(config.catalog().get("honey").is_some());
        Ok(())
    }

    #[test]
    fn configured_catalog_drives_the_modal() -> anyhow::Result<()> {
        let config = StoreConfig::default().merged_str(
            r#"{"currency_symbol":"Rs.","products":[{"id":"ghee","name":"Ghee","price":750,"image":"g.jpg","unit":"tin"}]}"#,
        )?;
        let mut modal = config.order_modal();
        assert!(modal.handle(ModalEvent::Open("honey".into())).is_empty());

        let effects = modal.handle(ModalEvent::Open("ghee".into()));
        let Some(Effect::Render(view)) = effects.first() else {
            anyhow::bail!("open should render first");
        };
        assert_eq!(view.price_label, "Rs.750 per tin");
        Ok(())
    }
}
