//! Retrying listing source on top of the Airtable client.

use std::str::FromStr;
use std::time::Duration;

use airtable_api::types::{Listing, ListingFields, RecordPage};
use airtable_api::{Client, Query, RecordQuery};
use rand::Rng;

use crate::config::{AirtableConfig, PropertyKind};
use crate::error::MarketplaceError;
use crate::pagination::{paginate, Page};

/// Records requested per round trip (the Airtable maximum).
const RECORDS_PER_REQUEST: u32 = 100;

/// How often, and how patiently, a failed page request is repeated.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Extra attempts after the first failure.
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 15000,
        }
    }
}

impl RetryConfig {
    /// Reads `MARKETPLACE_RETRY_MAX`, `MARKETPLACE_RETRY_BASE_MS` and
    /// `MARKETPLACE_RETRY_MAX_MS`, keeping the default for unset or bad values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_knob("MARKETPLACE_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_knob("MARKETPLACE_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_knob("MARKETPLACE_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// Wait before the `retry`-th repeat (1-based): the base delay doubled per
    /// earlier retry, capped, then scaled by a random factor in `[0.8, 1.2)`.
    fn backoff<R: Rng>(&self, retry: u32, rng: &mut R) -> Duration {
        let doubling = 2u64.saturating_pow(retry.saturating_sub(1));
        let capped = self
            .base_delay_ms
            .saturating_mul(doubling)
            .min(self.max_delay_ms);
        let scale: f64 = rng.gen_range(0.8..1.2);
        Duration::from_millis((capped as f64 * scale) as u64)
    }
}

/// Reads whole listing tables, following Airtable's cursor until exhausted.
///
/// A page request that fails in transit, is rate limited (429), or hits a
/// server error (5xx) is repeated with backoff. Client errors and payloads
/// that do not decode fail the drain at once.
pub struct ListingClient {
    inner: Client,
    config: AirtableConfig,
    retry: RetryConfig,
}

impl ListingClient {
    /// Creates a client for the base described by `config`.
    pub fn new(config: AirtableConfig) -> Self {
        let inner = match &config.base_url {
            Some(url) => Client::with_base_url(url, &config.api_key, &config.base_id),
            None => Client::new(&config.api_key, &config.base_id),
        };
        Self {
            inner,
            config,
            retry: RetryConfig::from_env(),
        }
    }

    /// Replaces the retry settings read from the environment.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Requests one page of `table`, repeating transient failures.
    async fn request_page(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<RecordPage<ListingFields>, airtable_api::Error> {
        let mut retries = 0u32;
        loop {
            match self.inner.list_records(table, query).await {
                Ok(page) => return Ok(page),
                Err(err) if is_transient(&err) && (retries as usize) < self.retry.max_retries => {
                    retries += 1;
                    let wait = self.retry.backoff(retries, &mut rand::thread_rng());
                    tracing::warn!(
                        "{} page request failed ({}), retry {}/{} in {}ms",
                        table,
                        err,
                        retries,
                        self.retry.max_retries,
                        wait.as_millis()
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Fetches every listing of the `kind` table, in datastore order.
    pub async fn fetch_all(&self, kind: PropertyKind) -> Result<Vec<Listing>, MarketplaceError> {
        let table = self.config.table_for(kind)?;
        let mut listings: Vec<Listing> = Vec::new();
        let mut offset: Option<String> = None;
        let mut requests = 0usize;

        loop {
            let mut query = RecordQuery::default().with_page_size(RECORDS_PER_REQUEST);
            if let Some(cursor) = &offset {
                query = query.with_offset(cursor);
            }
            let page = self.request_page(table, &query).await?;
            requests += 1;
            listings.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::info!(
            "fetched {} {} listings in {} request(s)",
            listings.len(),
            kind,
            requests
        );
        Ok(listings)
    }

    /// Fetches the whole table and returns the 1-indexed `page` of `limit` listings.
    pub async fn fetch_page(
        &self,
        kind: PropertyKind,
        page: usize,
        limit: usize,
    ) -> Result<Page<Listing>, MarketplaceError> {
        let listings = self.fetch_all(kind).await?;
        Ok(paginate(&listings, page, limit))
    }
}

/// Failures worth repeating: lost connections, rate limits, and server errors.
fn is_transient(err: &airtable_api::Error) -> bool {
    use airtable_api::Error;
    match err {
        Error::RequestFailed => true,
        Error::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
        Error::Decode(_) => false,
    }
}

fn env_knob<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring unparseable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}
