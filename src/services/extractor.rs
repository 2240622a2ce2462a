// src/services/extractor.rs

//! Availability extraction service.
//!
//! Turns a listing page into a [`ProductAvailability`] snapshot using the
//! configured selector chains. All markup knowledge lives here.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Availability, ListingSelectors, ProductAvailability};
use crate::utils::normalize_whitespace;

/// Service for reading product cards off a listing page.
#[derive(Debug)]
pub struct AvailabilityExtractor {
    cards: Selector,
    names: Vec<Selector>,
    badges: Vec<Selector>,
    sold_out_marker: String,
}

impl AvailabilityExtractor {
    /// Compile the selector chains. Fails on the first invalid selector.
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        if selectors.cards.is_empty() {
            return Err(AppError::config("no card selectors configured"));
        }

        Ok(Self {
            cards: Self::parse_selector(&selectors.cards.join(", "))?,
            names: Self::parse_chain(&selectors.names)?,
            badges: Self::parse_chain(&selectors.badges)?,
            sold_out_marker: selectors.sold_out_marker.clone(),
        })
    }

    /// Parse raw markup and extract the snapshot.
    pub fn extract_html(&self, html: &str) -> ProductAvailability {
        let document = Html::parse_document(html);
        self.extract(&document)
    }

    /// Extract the snapshot from a parsed document.
    ///
    /// Cards without a recognizable name are skipped. Duplicate names
    /// collapse to one entry, the last card seen wins.
    pub fn extract(&self, document: &Html) -> ProductAvailability {
        let mut snapshot = ProductAvailability::new();
        let mut skipped = 0usize;

        for card in document.select(&self.cards) {
            let Some(name) = self.card_name(&card) else {
                skipped += 1;
                continue;
            };
            let state = self.card_state(&card);
            if let Some(previous) = snapshot.insert(name.clone(), state) {
                log::debug!("Duplicate card for '{}' ({} → {})", name, previous, state);
            }
        }

        if skipped > 0 {
            log::debug!("Skipped {} cards without a product name", skipped);
        }
        log::debug!("Extracted {} products", snapshot.len());
        snapshot
    }

    /// First name selector in the chain that matches wins, regardless of
    /// where its match sits in the card relative to later selectors' matches.
    fn card_name(&self, card: &ElementRef) -> Option<String> {
        let element = self
            .names
            .iter()
            .find_map(|sel| card.select(sel).next())?;
        let name = normalize_whitespace(&element.text().collect::<String>());
        (!name.is_empty()).then_some(name)
    }

    fn card_state(&self, card: &ElementRef) -> Availability {
        let badge = self
            .badges
            .iter()
            .find_map(|sel| card.select(sel).next());

        match badge {
            Some(badge) if badge.text().collect::<String>().contains(&self.sold_out_marker) => {
                Availability::SoldOut
            }
            _ => Availability::Available,
        }
    }

    fn parse_chain(chain: &[String]) -> Result<Vec<Selector>> {
        chain.iter().map(|s| Self::parse_selector(s)).collect()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
