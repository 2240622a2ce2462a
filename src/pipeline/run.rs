// src/pipeline/run.rs

//! The fetch → extract → diff → format → notify → save pass.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::Result;
use crate::models::{Availability, ChangeRecord, Config, ProductAvailability};
use crate::services::{AvailabilityExtractor, HttpPageSource, Notifier, PageSource};
use crate::storage::{LocalSnapshotStore, SnapshotStore};
use crate::utils::http;

use super::diff::{diff, removed};
use super::format::MessageFormatter;

/// Outcome of one pass.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Snapshot extracted from the listing
    pub current: ProductAvailability,
    pub changes: Vec<ChangeRecord>,
    /// Products that disappeared since the baseline (not part of `changes`)
    pub removed: Vec<String>,
    /// Rendered notification text
    pub message: String,
    pub notified: bool,
    /// Whether the baseline was replaced
    pub saved: bool,
}

impl RunReport {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Wall-clock time the pass took.
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}

/// Wires the pipeline stages together.
pub struct StockWatcher {
    url: String,
    extractor: AvailabilityExtractor,
    formatter: MessageFormatter,
    source: Box<dyn PageSource>,
    store: Box<dyn SnapshotStore>,
    notifier: Notifier,
    only_on_change: bool,
}

impl StockWatcher {
    /// Build a watcher from explicit collaborators.
    pub fn new(
        config: &Config,
        source: Box<dyn PageSource>,
        store: Box<dyn SnapshotStore>,
        notifier: Notifier,
    ) -> Result<Self> {
        Ok(Self {
            url: config.target.url.clone(),
            extractor: AvailabilityExtractor::new(&config.selectors)?,
            formatter: MessageFormatter::from_config(&config.notify),
            source,
            store,
            notifier,
            only_on_change: config.notify.only_on_change,
        })
    }

    /// Build a watcher using HTTP, the local state file and the configured webhook.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        let notifier = Notifier::from_webhook(config.notify.webhook_url.as_deref(), client.clone());
        Self::new(
            config,
            Box::new(HttpPageSource::new(client)),
            Box::new(LocalSnapshotStore::new(&config.storage.state_file)),
            notifier,
        )
    }

    /// Fetch the listing and extract the current snapshot.
    pub async fn snapshot(&self) -> Result<ProductAvailability> {
        log::info!("Fetching {}", self.url);
        let html = self.source.fetch(&self.url).await?;
        let current = self.extractor.extract_html(&html);

        if current.is_empty() {
            log::warn!("No products found on {}", self.url);
        } else {
            log::info!(
                "Found {} products ({} available, {} sold out)",
                current.len(),
                current.count(Availability::Available),
                current.count(Availability::SoldOut)
            );
        }
        Ok(current)
    }

    /// Full pass: notify, then replace the baseline.
    ///
    /// A fetch failure returns before anything is notified or saved.
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = self.evaluate().await?;

        report.notified = if self.only_on_change && !report.has_changes() {
            log::info!("No changes, notification skipped");
            false
        } else {
            self.notifier.notify(&report.message).await
        };

        self.store.save(&report.current).await?;
        report.saved = true;
        report.finished_at = Utc::now();

        log::info!(
            "Baseline updated with {} products",
            report.current.len()
        );
        Ok(report)
    }

    /// Dry run: compute changes and the message without notifying or saving.
    pub async fn check(&self) -> Result<RunReport> {
        self.evaluate().await
    }

    async fn evaluate(&self) -> Result<RunReport> {
        let started_at = Utc::now();

        let current = self.snapshot().await?;
        let previous = self.store.load().await?;

        let changes = diff(&previous, &current);
        let removed: Vec<String> = removed(&previous, &current)
            .into_iter()
            .map(str::to_string)
            .collect();

        if changes.is_empty() {
            log::info!("No changes detected");
        } else {
            log::info!("{} changes detected", changes.len());
            for change in &changes {
                log::info!("    {}", change);
            }
        }
        for product in &removed {
            log::info!("No longer listed: {}", product);
        }

        let message = self.formatter.format(&current, &changes);

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            current,
            changes,
            removed,
            message,
            notified: false,
            saved: false,
        })
    }
}
