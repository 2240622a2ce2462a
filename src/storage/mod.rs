//! Storage abstractions for the baseline snapshot.
//!
//! Exactly one snapshot is kept: the mapping recorded by the last
//! completed run. Each save replaces it wholesale.
//!
//! ## File Layout
//!
//! ```text
//! availability.json
//! {
//!   "Dark Roast": "Available",
//!   "Ethiopia Guji": "Sold out"
//! }
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ProductAvailability;

// Re-export for convenience
pub use local::LocalSnapshotStore;

/// Trait for baseline snapshot backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the baseline. Missing storage yields an empty snapshot.
    async fn load(&self) -> Result<ProductAvailability>;

    /// Replace the baseline with `snapshot`.
    async fn save(&self, snapshot: &ProductAvailability) -> Result<()>;
}
