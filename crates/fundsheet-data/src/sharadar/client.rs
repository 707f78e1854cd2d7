//! Nasdaq Data Link datatables client with rate limiting.

use super::SF1_TABLE;
use super::datatable::{DatatableResponse, ErrorResponse};
use crate::dimension::{Database, Dimension};
use crate::error::{DataError, Result};
use crate::raw::RawRow;
use crate::source::FundamentalsSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://data.nasdaq.com/api/v3";

/// Environment variable that overrides the API base URL
pub const BASE_URL_VARIABLE: &str = "NASDAQ_DATA_LINK_BASE_URL";

/// Default spacing between requests
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on pages followed for one query
const MAX_PAGES: usize = 100;

/// Client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Minimum duration between requests
    pub min_interval: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            min_interval: DEFAULT_RATE_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Rate limiter spacing out consecutive requests
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Sharadar SF1 client for the Nasdaq Data Link datatables API
#[derive(Debug)]
pub struct SharadarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
    api_key: String,
}

impl SharadarClient {
    /// Create a client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client for `database`, reading its API key and an optional
    /// base URL override from the environment.
    ///
    /// # Errors
    /// Returns [`DataError::MissingCredentials`] when the tier's key is unset.
    ///
    /// # Example
    /// ```no_run
    /// use fundsheet_data::Database;
    /// use fundsheet_data::sharadar::SharadarClient;
    ///
    /// # fn example() -> fundsheet_data::Result<()> {
    /// let client = SharadarClient::from_env(Database::Sf1)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env(database: Database) -> Result<Self> {
        let api_key = database.api_key_from_env()?;
        let mut config = ClientConfig::default();
        if let Ok(base_url) = std::env::var(BASE_URL_VARIABLE)
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url.trim().to_string();
        }
        Self::with_config(api_key, config)
    }

    /// Create a client with custom settings.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch one page of the SF1 table.
    async fn fetch_page(&self, ticker: &str, dimension: Dimension, cursor: Option<&str>) -> Result<DatatableResponse> {
        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/datatables/{SF1_TABLE}.json", self.base_url);
        let dimension = dimension.to_string();
        let mut query = vec![
            ("ticker", ticker),
            ("dimension", dimension.as_str()),
            ("api_key", self.api_key.as_str()),
        ];
        if let Some(cursor) = cursor {
            query.push(("qopts.cursor_id", cursor));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(DataError::Network)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::not_found(ticker, dimension));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.quandl_error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(DataError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(DataError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl FundamentalsSource for SharadarClient {
    async fn fetch_rows(&self, ticker: &str, dimension: Dimension) -> Result<Vec<RawRow>> {
        if ticker.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Empty ticker".to_string()));
        }
        let ticker = ticker.trim().to_uppercase();

        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;
        for page in 0..MAX_PAGES {
            let response = self.fetch_page(&ticker, dimension, cursor.as_deref()).await?;
            let next = response.meta.next_cursor_id.clone();
            let page_rows = response.into_rows()?;
            debug!(ticker = %ticker, page, rows = page_rows.len(), "received SF1 page");
            rows.extend(page_rows);

            match next {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
            if page + 1 == MAX_PAGES {
                warn!(ticker = %ticker, "stopped following SF1 pages after {MAX_PAGES}");
            }
        }

        if rows.is_empty() {
            return Err(DataError::not_found(&ticker, dimension));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.min_interval, Duration::from_millis(100));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SharadarClient::new("key").unwrap().with_base_url("http://localhost:1234/api/v3/");
        assert_eq!(client.base_url, "http://localhost:1234/api/v3");
    }

    #[tokio::test]
    async fn test_empty_ticker_is_rejected() {
        let client = SharadarClient::new("key").unwrap();
        let err = client.fetch_rows("  ", Dimension::Mry).await.unwrap_err();
        assert!(matches!(err, DataError::InvalidSymbol(_)));
    }
}
