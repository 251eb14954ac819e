//! Normalized instrument records.
//!
//! An [`Asset`] is one row of the internal security master. Instruments are
//! identified for reconciliation by their composite FIGI, never by ticker:
//! tickers are reused across different instruments over time.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Supported listing venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// BATS Global Markets.
    Bats,
    /// NASDAQ.
    Nasdaq,
    /// NMFQS (mutual fund quotation service).
    Nmfqs,
    /// New York Stock Exchange.
    Nyse,
    /// NYSE Arca.
    NyseArca,
    /// NYSE American (formerly NYSE MKT).
    NyseMkt,
}

impl Exchange {
    /// Get the venue name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bats => "BATS",
            Self::Nasdaq => "NASDAQ",
            Self::Nmfqs => "NMFQS",
            Self::Nyse => "NYSE",
            Self::NyseArca => "NYSE ARCA",
            Self::NyseMkt => "NYSE MKT",
        }
    }

    /// IANA name of the exchange-local time zone.
    ///
    /// All supported venues trade on US Eastern time.
    #[must_use]
    pub const fn time_zone_name(&self) -> &'static str {
        "America/New_York"
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Instrument classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssetType {
    /// Common stock (including ADRs).
    CommonStock,
    /// Exchange-traded fund.
    Etf,
    /// Mutual fund.
    MutualFund,
    /// Unrecognized provider label.
    #[default]
    Unknown,
}

impl AssetType {
    /// Get the asset type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CommonStock => "Common Stock",
            Self::Etf => "ETF",
            Self::MutualFund => "Mutual Fund",
            Self::Unknown => "Unknown",
        }
    }
}

/// One instrument in the internal security master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker in internal notation (class shares separated by `/`).
    pub ticker: String,
    /// Primary listing venue.
    pub primary_exchange: Exchange,
    /// Instrument classification.
    pub asset_type: AssetType,
    /// Quotation currency.
    pub price_currency: String,
    /// First listing date, when the provider reported one.
    pub listing_date: Option<NaiveDate>,
    /// Delisting instant; `None` means currently listed.
    pub delisting_date: Option<DateTime<FixedOffset>>,
    /// Whether the instrument is currently tradable.
    ///
    /// Invariant: `active == delisting_date.is_none()`.
    pub active: bool,
    /// Composite FIGI; empty until identifier enrichment resolves one.
    pub composite_figi: String,
    /// When this record was produced.
    pub last_updated: DateTime<Utc>,
}

impl Asset {
    /// Mark the instrument delisted as of `at`.
    ///
    /// Keeps the `active`/`delisting_date` invariant in one place.
    pub fn mark_delisted(&mut self, at: DateTime<FixedOffset>) {
        self.active = false;
        self.delisting_date = Some(at);
    }

    /// Whether identifier enrichment resolved a composite FIGI.
    #[must_use]
    pub fn has_figi(&self) -> bool {
        !self.composite_figi.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn asset() -> Asset {
        Asset {
            ticker: "AAPL".to_string(),
            primary_exchange: Exchange::Nasdaq,
            asset_type: AssetType::CommonStock,
            price_currency: "USD".to_string(),
            listing_date: NaiveDate::from_ymd_opt(1980, 12, 12),
            delisting_date: None,
            active: true,
            composite_figi: "BBG000B9XRY4".to_string(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn mark_delisted_clears_active() {
        let mut asset = asset();
        let at = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 16, 0, 0)
            .unwrap();

        asset.mark_delisted(at);

        assert!(!asset.active);
        assert_eq!(asset.delisting_date, Some(at));
    }

    #[test]
    fn has_figi_requires_nonempty_identifier() {
        let mut asset = asset();
        assert!(asset.has_figi());

        asset.composite_figi.clear();
        assert!(!asset.has_figi());
    }

    #[test]
    fn exchange_names_match_provider_catalog() {
        assert_eq!(Exchange::NyseArca.as_str(), "NYSE ARCA");
        assert_eq!(Exchange::NyseMkt.as_str(), "NYSE MKT");
        assert_eq!(Exchange::Bats.time_zone_name(), "America/New_York");
    }
}
