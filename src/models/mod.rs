// src/models/mod.rs

//! Domain models for the stock watcher.

mod availability;
mod change;
mod config;
mod selectors;

// Re-export all public types
pub use availability::{Availability, ProductAvailability};
pub use change::ChangeRecord;
pub use config::{
    Config, HttpConfig, NotifyConfig, StorageConfig, TargetConfig, WEBHOOK_ENV_VAR,
};
pub use selectors::ListingSelectors;
