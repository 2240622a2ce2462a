//! Services for reading the listing page and sending notifications.

pub mod extractor;
pub mod notifier;
pub mod source;

pub use extractor::AvailabilityExtractor;
pub use notifier::{Notifier, NotifyChannel, WebhookChannel};
pub use source::{HttpPageSource, PageSource};
