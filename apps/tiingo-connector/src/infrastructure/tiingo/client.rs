//! HTTP client for the Tiingo catalog and daily-prices endpoints.

use std::io::Read;

use chrono::NaiveDate;
use reqwest::Client;

use super::config::TiingoConfig;
use super::error::TiingoError;
use super::messages::RawEodBar;
use crate::domain::normalize::RawCatalogRecord;

/// HTTP client for Tiingo.
#[derive(Debug, Clone)]
pub struct TiingoClient {
    client: Client,
    config: TiingoConfig,
}

impl TiingoClient {
    /// Create a client from config.
    ///
    /// # Errors
    ///
    /// Returns [`TiingoError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: TiingoConfig) -> Result<Self, TiingoError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Download and decode the full supported-tickers catalog.
    ///
    /// The response body is a zip archive whose first entry is the catalog
    /// CSV; any other entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`TiingoError`] on transport failure, a non-success
    /// status, or a corrupt archive or table.
    pub async fn supported_tickers(&self) -> Result<Vec<RawCatalogRecord>, TiingoError> {
        let response = self.client.get(&self.config.catalog_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TiingoError::Status {
                status: status.as_u16(),
                url: self.config.catalog_url.clone(),
            });
        }

        let body = response.bytes().await?;
        let table = extract_first_entry(&body)?;
        parse_catalog(&table)
    }

    /// Fetch daily price bars for one instrument since `start_date`.
    ///
    /// # Errors
    ///
    /// Returns [`TiingoError::Transport`] on transport failure or
    /// [`TiingoError::Status`] on a non-success response.
    pub async fn daily_prices(
        &self,
        provider_ticker: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<RawEodBar>, TiingoError> {
        let url = format!(
            "{}/tiingo/daily/{provider_ticker}/prices",
            self.config.eod_base_url
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("startDate", start_date.format("%Y-%m-%d").to_string()),
                ("token", self.config.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TiingoError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json().await?)
    }
}

/// Read the first entry of the catalog archive.
fn extract_first_entry(body: &[u8]) -> Result<Vec<u8>, TiingoError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(body))
        .map_err(|error| TiingoError::Archive(error.to_string()))?;

    if archive.is_empty() {
        return Err(TiingoError::Archive("archive contains no entries".to_string()));
    }

    let mut entry = archive
        .by_index(0)
        .map_err(|error| TiingoError::Archive(error.to_string()))?;

    let mut table = Vec::new();
    entry
        .read_to_end(&mut table)
        .map_err(|error| TiingoError::Archive(error.to_string()))?;

    Ok(table)
}

/// Decode the catalog CSV into raw records.
fn parse_catalog(table: &[u8]) -> Result<Vec<RawCatalogRecord>, TiingoError> {
    let mut reader = csv::Reader::from_reader(table);
    let mut records = Vec::new();

    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}
