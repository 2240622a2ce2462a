//! Change records produced by comparing two snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Availability;

/// A single detected change between the baseline and the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeRecord {
    /// Product not present in the baseline
    Added {
        product: String,
        new_state: Availability,
    },
    /// Product present in the baseline with a different state
    Transitioned {
        product: String,
        old_state: Availability,
        new_state: Availability,
    },
}

impl ChangeRecord {
    pub fn added(product: impl Into<String>, new_state: Availability) -> Self {
        Self::Added {
            product: product.into(),
            new_state,
        }
    }

    pub fn transitioned(
        product: impl Into<String>,
        old_state: Availability,
        new_state: Availability,
    ) -> Self {
        Self::Transitioned {
            product: product.into(),
            old_state,
            new_state,
        }
    }

    pub fn product(&self) -> &str {
        match self {
            Self::Added { product, .. } | Self::Transitioned { product, .. } => product,
        }
    }

    pub fn new_state(&self) -> Availability {
        match self {
            Self::Added { new_state, .. } | Self::Transitioned { new_state, .. } => *new_state,
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { product, new_state } => write!(f, "{product}: added ({new_state})"),
            Self::Transitioned {
                product,
                old_state,
                new_state,
            } => write!(f, "{product}: {old_state} → {new_state}"),
        }
    }
}
