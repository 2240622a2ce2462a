//! Page retrieval.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::HttpConfig;
use crate::utils::http;

/// Something that can hand back the raw markup of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Retrieve the document at `url`.
    ///
    /// Fails with [`crate::error::AppError::Fetch`] when the page cannot be retrieved.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP.
#[derive(Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(http::create_async_client(config)?))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        http::fetch_text(&self.client, url).await
    }
}
