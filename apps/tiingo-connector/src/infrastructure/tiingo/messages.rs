//! Tiingo wire formats.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One daily price bar as returned by the daily-prices endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEodBar {
    /// Bar date as an RFC 3339 timestamp.
    pub date: String,
    /// Opening price.
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    /// Session high.
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    /// Session low.
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    /// Closing price.
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    /// Traded volume.
    #[serde(with = "rust_decimal::serde::float")]
    pub volume: Decimal,
    /// Cash dividend paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub div_cash: Decimal,
    /// Split factor.
    #[serde(with = "rust_decimal::serde::float")]
    pub split_factor: Decimal,
}
