//! Catalog record normalization.
//!
//! Maps raw provider catalog rows to internal [`Asset`] records, applying
//! the venue allow-list, the ticker filter, notation translation and the
//! delisting grace period. All provider rule tables are explicit
//! configuration so the pipeline is testable without process-wide setup.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use super::asset::{Asset, AssetType, Exchange};
use super::symbology::{SymbolTranslator, TickerFilter};

/// Calendar date format used by the provider catalog.
const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the provider's supported-tickers table, as downloaded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogRecord {
    /// Ticker in provider notation.
    #[serde(default)]
    pub ticker: String,
    /// Venue name as the provider spells it.
    #[serde(default)]
    pub exchange: String,
    /// Provider asset-type label.
    #[serde(default)]
    pub asset_type: String,
    /// Quotation currency.
    #[serde(default)]
    pub price_currency: String,
    /// Listing date string; may be empty.
    #[serde(default)]
    pub start_date: String,
    /// Delisting date string; empty while the instrument trades.
    #[serde(default)]
    pub end_date: String,
}

/// Provider rule tables consumed by the normalizer.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Venue allow-list: provider venue name to internal exchange.
    pub exchanges: HashMap<String, Exchange>,
    /// Provider asset-type label to internal classification.
    pub asset_types: HashMap<String, AssetType>,
    /// Window during which a reported delisting is suppressed to absorb
    /// provider reporting lag.
    pub delisting_grace: chrono::Duration,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let exchanges = [
            ("BATS", Exchange::Bats),
            ("NASDAQ", Exchange::Nasdaq),
            ("NMFQS", Exchange::Nmfqs),
            ("NYSE", Exchange::Nyse),
            ("NYSE ARCA", Exchange::NyseArca),
            ("NYSE MKT", Exchange::NyseMkt),
        ]
        .into_iter()
        .map(|(name, exchange)| (name.to_string(), exchange))
        .collect();

        let asset_types = [
            ("Stock", AssetType::CommonStock),
            ("ETF", AssetType::Etf),
            ("Mutual Fund", AssetType::MutualFund),
        ]
        .into_iter()
        .map(|(label, asset_type)| (label.to_string(), asset_type))
        .collect();

        Self {
            exchanges,
            asset_types,
            delisting_grace: chrono::Duration::days(7),
        }
    }
}

/// Maps raw catalog rows to normalized assets, or drops them.
#[derive(Debug, Clone)]
pub struct CatalogNormalizer {
    config: NormalizerConfig,
    translator: SymbolTranslator,
    filter: TickerFilter,
    zone: Tz,
}

impl CatalogNormalizer {
    /// Create a normalizer over the given rule tables and exchange zone.
    #[must_use]
    pub const fn new(
        config: NormalizerConfig,
        translator: SymbolTranslator,
        filter: TickerFilter,
        zone: Tz,
    ) -> Self {
        Self {
            config,
            translator,
            filter,
            zone,
        }
    }

    /// Normalize one catalog row.
    ///
    /// Returns `None` when the record is excluded (venue not supported, no
    /// lifecycle information, or the ticker filter matched). A returned
    /// asset is `active` exactly when its resolved delisting date is empty;
    /// only active records are candidates for the active set.
    #[must_use]
    pub fn normalize(&self, raw: &RawCatalogRecord, now: DateTime<Utc>) -> Option<Asset> {
        let Some(&exchange) = self.config.exchanges.get(raw.exchange.as_str()) else {
            tracing::debug!(ticker = %raw.ticker, exchange = %raw.exchange, "venue not supported");
            return None;
        };

        // No lifecycle information at all: nothing to reconcile against.
        if raw.start_date.is_empty() && raw.end_date.is_empty() {
            return None;
        }

        if self.filter.is_ignored(&raw.ticker) {
            tracing::debug!(ticker = %raw.ticker, "ticker filtered");
            return None;
        }

        let ticker = self.translator.to_internal(&raw.ticker);

        let asset_type = self
            .config
            .asset_types
            .get(raw.asset_type.as_str())
            .copied()
            .unwrap_or_else(|| {
                tracing::warn!(ticker = %ticker, label = %raw.asset_type, "unmapped asset type label");
                AssetType::Unknown
            });

        let listing_date = self.parse_listing_date(&raw.ticker, &raw.start_date);
        let delisting_date = self.resolve_delisting(&raw.ticker, &raw.end_date, now);

        Some(Asset {
            ticker,
            primary_exchange: exchange,
            asset_type,
            price_currency: raw.price_currency.clone(),
            listing_date,
            delisting_date,
            active: delisting_date.is_none(),
            composite_figi: String::new(),
            last_updated: now,
        })
    }

    fn parse_listing_date(&self, ticker: &str, start_date: &str) -> Option<NaiveDate> {
        if start_date.is_empty() {
            return None;
        }

        match NaiveDate::parse_from_str(start_date, CATALOG_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(error) => {
                tracing::warn!(ticker = %ticker, start_date = %start_date, %error, "could not parse listing date");
                None
            }
        }
    }

    /// Resolve the delisting date string against the grace period.
    ///
    /// A delisting younger than the grace window is suppressed: the
    /// provider routinely reports delistings a few days before they take
    /// effect downstream. An unparseable date carries no delisting
    /// information and leaves the instrument listed.
    fn resolve_delisting(
        &self,
        ticker: &str,
        end_date: &str,
        now: DateTime<Utc>,
    ) -> Option<DateTime<FixedOffset>> {
        if end_date.is_empty() {
            return None;
        }

        let date = match NaiveDate::parse_from_str(end_date, CATALOG_DATE_FORMAT) {
            Ok(date) => date,
            Err(error) => {
                tracing::warn!(ticker = %ticker, end_date = %end_date, %error, "could not parse delisting date");
                return None;
            }
        };

        let Some(delisted_at) = self
            .zone
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
        else {
            tracing::warn!(ticker = %ticker, end_date = %end_date, "delisting date has no unambiguous local midnight");
            return None;
        };

        let age = now.signed_duration_since(delisted_at.with_timezone(&Utc));
        if age < self.config.delisting_grace {
            None
        } else {
            Some(delisted_at.fixed_offset())
        }
    }
}
