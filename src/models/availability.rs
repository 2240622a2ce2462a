//! Product availability snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::normalize_whitespace;

/// Stock state of a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Sold out")]
    SoldOut,
}

impl Availability {
    /// Label used in the state file and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::SoldOut => "Sold out",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping of product name to availability, as of one run.
///
/// Entries are keyed by a folded form of the name (whitespace collapsed,
/// lowercased), so `"Dark Roast"` and `"DARK  ROAST"` are the same product.
/// The most recently inserted spelling is kept for display. Iteration is
/// alphabetical by folded name; diffing and rendering rely on that order.
///
/// Serialized as a plain JSON object of display name to state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductAvailability {
    products: BTreeMap<String, Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    state: Availability,
}

impl ProductAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comparison key for a product name.
    pub fn key(name: &str) -> String {
        normalize_whitespace(name).to_lowercase()
    }

    /// Record a product's state, replacing any earlier entry with the same key.
    pub fn insert(&mut self, name: impl Into<String>, state: Availability) -> Option<Availability> {
        let name = normalize_whitespace(&name.into());
        self.products
            .insert(Self::key(&name), Entry { name, state })
            .map(|previous| previous.state)
    }

    pub fn get(&self, name: &str) -> Option<Availability> {
        self.products.get(&Self::key(name)).map(|e| e.state)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(&Self::key(name))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate `(display name, state)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Availability)> {
        self.products.values().map(|e| (e.name.as_str(), e.state))
    }

    /// Names of all products in the given state, in key order.
    pub fn names_with(&self, state: Availability) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |(_, s)| *s == state)
            .map(|(name, _)| name)
    }

    /// Number of products in the given state.
    pub fn count(&self, state: Availability) -> usize {
        self.names_with(state).count()
    }
}

impl<S: Into<String>> FromIterator<(S, Availability)> for ProductAvailability {
    fn from_iter<I: IntoIterator<Item = (S, Availability)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, state) in iter {
            snapshot.insert(name, state);
        }
        snapshot
    }
}

impl Serialize for ProductAvailability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for ProductAvailability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Availability>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
