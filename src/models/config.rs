//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ListingSelectors;

/// Environment variable holding the outbound webhook URL.
pub const WEBHOOK_ENV_VAR: &str = "SLACK_WEBHOOK_URL";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing page to watch
    #[serde(default)]
    pub target: TargetConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Markup matching rules
    #[serde(default)]
    pub selectors: ListingSelectors,

    /// Snapshot persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Outbound notification settings
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, or return defaults if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error: running
    /// with defaults would watch the wrong page and overwrite the baseline.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(&path) {
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No config at {:?}, using defaults",
                    path.as_ref()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Only the webhook URL can be overridden. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(WEBHOOK_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.notify.webhook_url = Some(url.trim().to_string());
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.target.url)
            .map_err(|e| AppError::validation(format!("target.url is invalid: {e}")))?;

        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }

        let chains = [
            ("selectors.cards", &self.selectors.cards),
            ("selectors.names", &self.selectors.names),
            ("selectors.badges", &self.selectors.badges),
        ];
        for (field, chain) in chains {
            if chain.is_empty() {
                return Err(AppError::validation(format!("{field} is empty")));
            }
            for selector in chain {
                scraper::Selector::parse(selector)
                    .map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
            }
        }
        if self.selectors.sold_out_marker.is_empty() {
            return Err(AppError::validation("selectors.sold_out_marker is empty"));
        }

        if self.storage.state_file.as_os_str().is_empty() {
            return Err(AppError::validation("storage.state_file is empty"));
        }

        if let Some(webhook) = &self.notify.webhook_url {
            url::Url::parse(webhook)
                .map_err(|e| AppError::validation(format!("notify.webhook_url is invalid: {e}")))?;
        }
        Ok(())
    }
}

/// Listing page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// URL of the product listing page
    #[serde(default = "defaults::target_url")]
    pub url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: defaults::target_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the baseline snapshot
    #[serde(default = "defaults::state_file")]
    pub state_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: defaults::state_file(),
        }
    }
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Incoming webhook endpoint; notifications are skipped when unset
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Message header
    #[serde(default = "defaults::title")]
    pub title: String,

    /// Prefix the change banner with an `@everyone` mention
    #[serde(default = "defaults::mention_everyone")]
    pub mention_everyone: bool,

    /// Skip delivery on runs without changes
    #[serde(default)]
    pub only_on_change: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            title: defaults::title(),
            mention_everyone: defaults::mention_everyone(),
            only_on_change: false,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn target_url() -> String {
        "https://komunacoffee.com/collections/coffee-beans".into()
    }

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; stock-watch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn state_file() -> PathBuf {
        PathBuf::from("availability.json")
    }

    pub fn title() -> String {
        "Komuna Coffee Stock Update".into()
    }
    pub fn mention_everyone() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.badges = vec!["span[[".to_string()];
        assert!(matches!(
            config.validate(),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_name_chain() {
        let mut config = Config::default();
        config.selectors.names.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_webhook_url() {
        let mut config = Config::default();
        config.notify.webhook_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [target]
            url = "https://shop.example/collections/all"

            [notify]
            mention_everyone = false
            "#,
        )
        .unwrap();

        assert_eq!(config.target.url, "https://shop.example/collections/all");
        assert!(!config.notify.mention_everyone);
        assert_eq!(config.notify.title, "Komuna Coffee Stock Update");
        assert_eq!(config.storage.state_file, PathBuf::from("availability.json"));
        assert_eq!(config.selectors.sold_out_marker, "Sold out");
    }

    #[test]
    fn example_config_is_valid() {
        let config: Config = toml::from_str(include_str!("../../stock-watch.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.notify.webhook_url.is_none());
        assert_eq!(config.selectors.names.len(), 4);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stock-watch.toml");
        fs::write(&path, "[target\nurl = \"https://shop.example\"\n").unwrap();

        assert!(matches!(
            Config::load_or_default(&path),
            Err(AppError::Toml(_))
        ));
    }

    #[test]
    fn load_or_default_rejects_wrong_types() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stock-watch.toml");
        fs::write(&path, "[http]\ntimeout_secs = \"thirty\"\n").unwrap();

        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn load_reads_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stock-watch.toml");
        fs::write(&path, "[storage]\nstate_file = \"state/beans.json\"\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.storage.state_file, PathBuf::from("state/beans.json"));
    }

    #[test]
    fn validate_reports_bad_target_url() {
        let mut config = Config::default();
        config.target.url = "komunacoffee.com/collections".to_string();
        match config.validate() {
            Err(AppError::Validation(message)) => assert!(message.contains("target.url")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn apply_env_sets_webhook() {
        let mut config = Config::default();
        config.apply_env(|key| {
            (key == WEBHOOK_ENV_VAR).then(|| "https://hooks.example/T000/B000".to_string())
        });
        assert_eq!(
            config.notify.webhook_url.as_deref(),
            Some("https://hooks.example/T000/B000")
        );
    }

    #[test]
    fn apply_env_ignores_blank_value() {
        let mut config = Config::default();
        config.notify.webhook_url = Some("https://hooks.example/from-file".to_string());
        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(
            config.notify.webhook_url.as_deref(),
            Some("https://hooks.example/from-file")
        );
    }
}
