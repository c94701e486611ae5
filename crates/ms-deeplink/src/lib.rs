//! Messaging deep links (`https://wa.me/<digits>?text=<message>`).
//!
//! Building a link never fails and never touches the network; the caller
//! decides how to open it.

use ms_catalog::{Catalog, Product};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://wa.me";
pub const DEFAULT_PHONE_NUMBER: &str = "+918088653820";

pub const GENERAL_MESSAGE: &str = "Hi! I'm interested in your Malenadu Savi products. Could you please share more details about availability and pricing?";
pub const GENERIC_MESSAGE: &str =
    "Hi! I'm interested in your products. Could you please share more details?";

/// Characters left intact by ECMAScript `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind<'a> {
    General,
    Product(&'a Product),
    /// Literal order text, sent verbatim.
    Order(String),
    Generic,
}

impl<'a> MessageKind<'a> {
    /// Map a markup kind (`"general"`, a product id, `"order"`) onto a message.
    ///
    /// Unknown kinds, and `"order"` without text, fall back to [`MessageKind::Generic`].
    pub fn parse(raw: &str, literal: Option<&str>, catalog: &'a Catalog) -> Self {
        let raw = raw.trim();
        match raw {
            "general" => Self::General,
            "order" => match literal {
                Some(text) if !text.trim().is_empty() => Self::Order(text.to_owned()),
                _ => {
                    warn!("order message requested without text, using generic enquiry");
                    Self::Generic
                }
            },
            id => match catalog.get(id) {
                Some(product) => Self::Product(product),
                None => {
                    warn!(kind = id, "unrecognised message kind, using generic enquiry");
                    Self::Generic
                }
            },
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::General => Cow::Borrowed(GENERAL_MESSAGE),
            Self::Product(product) => Cow::Owned(format!(
                "Hi! I would like to order {}.\n\nPlease confirm Price, availability and delivery details. Thank you!",
                product.name
            )),
            Self::Order(text) => Cow::Borrowed(text.as_str()),
            Self::Generic => Cow::Borrowed(GENERIC_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_phone_number")]
    pub phone_number: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_phone_number() -> String {
    DEFAULT_PHONE_NUMBER.to_owned()
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            phone_number: default_phone_number(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkConfigError {
    #[error("invalid messaging endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("messaging endpoint must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("messaging endpoint {0:?} cannot carry a query or fragment")]
    EndpointSuffix(String),
    #[error("phone number {0:?} contains no digits")]
    NoDigits(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    endpoint: String,
    digits: String,
}

impl LinkBuilder {
    pub fn new(config: &LinkConfig) -> Result<Self, LinkConfigError> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        let parsed = Url::parse(endpoint).map_err(|source| LinkConfigError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LinkConfigError::UnsupportedScheme(parsed.scheme().to_owned()));
        }
        // the destination and text are appended as path and query
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(LinkConfigError::EndpointSuffix(config.endpoint.clone()));
        }

        let digits = normalize_phone(&config.phone_number);
        if digits.is_empty() {
            return Err(LinkConfigError::NoDigits(config.phone_number.clone()));
        }

        Ok(Self {
            endpoint: endpoint.to_owned(),
            digits,
        })
    }

    pub fn destination(&self) -> &str {
        &self.digits
    }

    pub fn link(&self, kind: &MessageKind<'_>) -> String {
        self.link_for_text(&kind.text())
    }

    pub fn link_for_text(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.endpoint,
            self.digits,
            encode_component(text)
        )
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            digits: normalize_phone(DEFAULT_PHONE_NUMBER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("a b&c=d?#/"), "a%20b%26c%3Dd%3F%23%2F");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("₹500\n"), "%E2%82%B9500%0A");
    }

    #[test]
    fn strips_non_digits_from_destination() {
        assert_eq!(normalize_phone("+91 (808) 865-3820"), "918088653820");
        assert_eq!(LinkBuilder::default().destination(), "918088653820");
    }

    #[test]
    fn general_link_is_a_valid_url() -> anyhow::Result<()> {
        let link = LinkBuilder::default().link(&MessageKind::General);
        assert!(link.starts_with("https://wa.me/918088653820?text=Hi!%20I'm%20interested"));

        let parsed = Url::parse(&link)?;
        let text = parsed
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned());
        assert_eq!(text.as_deref(), Some(GENERAL_MESSAGE));
        Ok(())
    }

    #[test]
    fn order_text_is_sent_verbatim() -> anyhow::Result<()> {
        let builder = LinkBuilder::default();
        let link = builder.link(&MessageKind::Order("Total: ₹5000 & more".to_owned()));
        assert!(link.ends_with("?text=Total%3A%20%E2%82%B95000%20%26%20more"));
        assert!(!link[link.find('?').unwrap_or(0) + 1..].contains(' '));
        Url::parse(&link)?;
        Ok(())
    }

    #[test]
    fn parse_maps_catalog_ids_and_falls_back() {
        let catalog = Catalog::default();
        assert_eq!(MessageKind::parse("general", None, &catalog), MessageKind::General);
        assert_eq!(MessageKind::parse("mango", None, &catalog), MessageKind::Generic);
        assert_eq!(MessageKind::parse("order", None, &catalog), MessageKind::Generic);
        assert_eq!(
            MessageKind::parse("order", Some("two jars"), &catalog),
            MessageKind::Order("two jars".to_owned())
        );

        let kind = MessageKind::parse("pickle", Some("ignored"), &catalog);
        assert!(matches!(&kind, MessageKind::Product(p) if p.id.as_str() == "pickle"));
        assert!(kind.text().starts_with("Hi! I would like to order Amtekayi (hog plum) Pickle."));
    }

    #[test]
    fn config_validation() {
        let config = LinkConfig {
            endpoint: "https://api.whatsapp.example/".to_owned(),
            phone_number: "+1 555 0100".to_owned(),
        };
        let builder = LinkBuilder::new(&config).expect("config should be valid");
        assert_eq!(
            builder.link_for_text("hi"),
            "https://api.whatsapp.example/15550100?text=hi"
        );

        let no_digits = LinkConfig {
            phone_number: "call us".to_owned(),
            ..LinkConfig::default()
        };
        assert_eq!(
            LinkBuilder::new(&no_digits),
            Err(LinkConfigError::NoDigits("call us".to_owned()))
        );

        let ftp = LinkConfig {
            endpoint: "ftp://wa.me".to_owned(),
            ..LinkConfig::default()
        };
        assert_eq!(
            LinkBuilder::new(&ftp),
            Err(LinkConfigError::UnsupportedScheme("ftp".to_owned()))
        );

        for endpoint in ["https://wa.me?src=site", "https://wa.me/#chat", "https://wa.me/?"] {
            let suffixed = LinkConfig {
                endpoint: endpoint.to_owned(),
                ..LinkConfig::default()
            };
            assert_eq!(
                LinkBuilder::new(&suffixed),
                Err(LinkConfigError::EndpointSuffix(endpoint.to_owned()))
            );
        }

        let relative = LinkConfig {
            endpoint: "wa.me".to_owned(),
            ..LinkConfig::default()
        };
        assert!(matches!(
            LinkBuilder::new(&relative),
            Err(LinkConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn endpoint_path_keeps_destination_in_path() -> anyhow::Result<()> {
        let config = LinkConfig {
            endpoint: "https://chat.example/send/".to_owned(),
            ..LinkConfig::default()
        };
        let link = LinkBuilder::new(&config)?.link_for_text("hi");
        let parsed = Url::parse(&link)?;
        assert_eq!(parsed.path(), "/send/918088653820");
        assert_eq!(parsed.query(), Some("text=hi"));
        Ok(())
    }

    #[test]
    fn config_deserializes_with_defaults() -> anyhow::Result<()> {
        let config: LinkConfig = serde_json::from_str(r#"{"phone_number":"+44 20 7946 0000"}"#)?;
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(LinkBuilder::new(&config)?.destination(), "442079460000");
        Ok(())
    }
}
