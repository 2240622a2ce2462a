// src/models/selectors.rs

//! CSS selectors for reading a product listing page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping a product listing.
///
/// Name and badge selectors form fallback chains: they are tried in order
/// and the first one that matches inside a card wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selectors for product cards; any of them marks a card
    #[serde(default = "defaults::cards")]
    pub cards: Vec<String>,

    /// Selectors for the product name within a card
    #[serde(default = "defaults::names")]
    pub names: Vec<String>,

    /// Selectors for the status badge within a card
    #[serde(default = "defaults::badges")]
    pub badges: Vec<String>,

    /// Badge text marking a product as sold out (case-sensitive substring)
    #[serde(default = "defaults::sold_out_marker")]
    pub sold_out_marker: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            cards: defaults::cards(),
            names: defaults::names(),
            badges: defaults::badges(),
            sold_out_marker: defaults::sold_out_marker(),
        }
    }
}

mod defaults {
    pub fn cards() -> Vec<String> {
        vec!["div.product-card".into(), "div.card__information".into()]
    }

    pub fn names() -> Vec<String> {
        vec![
            r#"h3[class*="card__heading"]"#.into(),
            r#"a[class*="card__heading"]"#.into(),
            "h3.product-card__title".into(),
            "a.product-card__title".into(),
        ]
    }

    pub fn badges() -> Vec<String> {
        vec![
            "div.card__badge.bottom.left span.badge.badge--bottom-left.color-scheme-3".into(),
            ".card__badge .badge".into(),
        ]
    }

    pub fn sold_out_marker() -> String {
        "Sold out".into()
    }
}
