//! End-of-day price dataset run.
//!
//! Fetches recent daily bars for every active instrument, one rate-limited
//! request per instrument, and normalizes each bar to the exchange-local
//! market close.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::RunError;
use super::ports::AssetStore;
use super::reporter::RunReporter;
use super::{exchange_zone, send_observation};
use crate::domain::observation::{EodQuote, Observation, RunSummary};
use crate::domain::symbology::SymbolTranslator;
use crate::infrastructure::config::Subscription;
use crate::infrastructure::metrics;
use crate::infrastructure::rate_limit::RateLimiter;
use crate::infrastructure::tiingo::{TiingoClient, TiingoConfig};

/// Trailing window requested from the provider.
const LOOKBACK_DAYS: i64 = 14;

/// Hour of the exchange-local market close.
const MARKET_CLOSE_HOUR: i64 = 16;

/// The end-of-day price dataset run.
pub struct EodRun {
    client: TiingoClient,
    translator: SymbolTranslator,
    store: Arc<dyn AssetStore>,
    zone: Tz,
}

impl EodRun {
    /// Build an EOD run against the given store.
    ///
    /// Zone resolution and HTTP client construction happen here, before
    /// any I/O.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] when initialization fails.
    pub fn new(config: TiingoConfig, store: Arc<dyn AssetStore>) -> Result<Self, RunError> {
        Ok(Self {
            client: TiingoClient::new(config)?,
            translator: SymbolTranslator::default(),
            store,
            zone: exchange_zone()?,
        })
    }

    /// Execute the run.
    ///
    /// Exactly one [`RunSummary`] is delivered on `completion`, whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`RunError`] that aborted the run, if any.
    pub async fn execute(
        &self,
        subscription: &Subscription,
        out: mpsc::Sender<Observation>,
        completion: mpsc::Sender<RunSummary>,
        cancel: CancellationToken,
    ) -> Result<(), RunError> {
        let mut reporter = RunReporter::begin(subscription, completion);

        let result = self.run(subscription, &out, &mut reporter, &cancel).await;
        if let Err(error) = &result {
            tracing::error!(%error, subscription = %subscription.name, "EOD run aborted");
        }

        reporter.finish().await;
        result
    }

    async fn run(
        &self,
        subscription: &Subscription,
        out: &mpsc::Sender<Observation>,
        reporter: &mut RunReporter,
        cancel: &CancellationToken,
    ) -> Result<(), RunError> {
        let mut limiter = RateLimiter::per_minute(subscription.rate_limit()?);

        let mut connection = self.store.acquire().await?;
        let assets = connection
            .active_assets(subscription.dataset.as_deref())
            .await?;
        tracing::debug!(assets = assets.len(), "downloading EOD quotes");

        let start_date = (Utc::now() - chrono::Duration::days(LOOKBACK_DAYS)).date_naive();
        let mut emitted: HashSet<(String, NaiveDate)> = HashSet::new();

        for asset in assets {
            limiter.acquire(cancel).await?;

            let provider_ticker = self.translator.to_provider(&asset.ticker);
            let bars = match self.client.daily_prices(&provider_ticker, start_date).await {
                Ok(bars) => bars,
                Err(error) if error.is_per_request() => {
                    tracing::warn!(%error, ticker = %asset.ticker, "skipping instrument");
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            for bar in bars {
                let Some(close_time) = self.market_close(&bar.date) else {
                    tracing::warn!(ticker = %asset.ticker, date = %bar.date, "could not parse EOD bar date");
                    continue;
                };

                // One quote per (ticker, date) per run.
                if !emitted.insert((asset.ticker.clone(), close_time.date_naive())) {
                    continue;
                }

                let quote = EodQuote {
                    date: close_time,
                    ticker: asset.ticker.clone(),
                    composite_figi: asset.composite_figi.clone(),
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                    dividend: bar.div_cash,
                    split_factor: bar.split_factor,
                };

                let observation =
                    Observation::eod_quote(quote, &subscription.id, &subscription.name);
                send_observation(out, observation, cancel).await?;
                reporter.record_observation();
                metrics::record_observation("eod_quote");
            }
        }

        Ok(())
    }

    /// Force a provider bar timestamp onto the exchange-local market close.
    ///
    /// Only the calendar date of the provider timestamp is kept; the time
    /// component the provider returns is meaningless for EOD bars.
    fn market_close(&self, raw_date: &str) -> Option<DateTime<FixedOffset>> {
        let parsed = DateTime::parse_from_rfc3339(raw_date).ok()?;
        let close = parsed.date_naive().and_time(NaiveTime::MIN)
            + chrono::Duration::hours(MARKET_CLOSE_HOUR);

        self.zone
            .from_local_datetime(&close)
            .single()
            .map(|close| close.fixed_offset())
    }
}
