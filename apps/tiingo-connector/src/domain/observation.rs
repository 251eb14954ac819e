//! Output envelope and run summary types.
//!
//! Every record leaving a run is wrapped in an [`Observation`]; the run
//! itself is summarized by exactly one [`RunSummary`] on its completion
//! channel.

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// One end-of-day price bar, normalized to the exchange-local market close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EodQuote {
    /// Trading date at 16:00 exchange-local time.
    pub date: DateTime<FixedOffset>,
    /// Ticker in internal notation.
    pub ticker: String,
    /// Composite FIGI of the instrument.
    pub composite_figi: String,
    /// Opening price.
    pub open: Decimal,
    /// Session high.
    pub high: Decimal,
    /// Session low.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: Decimal,
    /// Cash dividend paid, if any.
    pub dividend: Decimal,
    /// Split factor (1 when no split occurred).
    pub split_factor: Decimal,
}

/// Payload carried by an observation: exactly one record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// A security-master record.
    Asset(Asset),
    /// A daily price bar.
    EodQuote(EodQuote),
}

/// Envelope handed to the downstream consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The record being delivered.
    pub payload: Payload,
    /// Wall-clock time the record was produced (not the data's own date).
    pub observed_at: DateTime<Utc>,
    /// Identifier of the originating subscription.
    pub subscription_id: String,
    /// Display name of the originating subscription.
    pub subscription_name: String,
}

impl Observation {
    /// Wrap an asset record for the given subscription.
    #[must_use]
    pub fn asset(
        asset: Asset,
        subscription_id: impl Into<String>,
        subscription_name: impl Into<String>,
    ) -> Self {
        Self {
            payload: Payload::Asset(asset),
            observed_at: Utc::now(),
            subscription_id: subscription_id.into(),
            subscription_name: subscription_name.into(),
        }
    }

    /// Wrap a daily price bar for the given subscription.
    #[must_use]
    pub fn eod_quote(
        quote: EodQuote,
        subscription_id: impl Into<String>,
        subscription_name: impl Into<String>,
    ) -> Self {
        Self {
            payload: Payload::EodQuote(quote),
            observed_at: Utc::now(),
            subscription_id: subscription_id.into(),
            subscription_name: subscription_name.into(),
        }
    }
}

/// Result of one dataset run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Identifier of the subscription that owned the run.
    pub subscription_id: String,
    /// Display name of the subscription.
    pub subscription_name: String,
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// When the run finished (success, failure or cancellation).
    pub end_time: DateTime<Utc>,
    /// Number of observations delivered downstream.
    pub num_observations: usize,
}
