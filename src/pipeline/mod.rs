//! Pipeline stages for one watch pass.
//!
//! - `diff`: compare the baseline with the current snapshot
//! - `format`: render the notification text
//! - `run`: wire fetch, extract, diff, format, notify and save together

pub mod diff;
pub mod format;
pub mod run;

pub use diff::{diff, removed};
pub use format::MessageFormatter;
pub use run::{RunReport, StockWatcher};
