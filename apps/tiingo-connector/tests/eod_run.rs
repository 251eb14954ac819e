//! End-to-end tests for the EOD dataset run.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal_macros::dec;
use serde_json::json;
use tiingo_connector::{
    Asset, AssetStore, AssetType, EodQuote, EodRun, Exchange, Observation, Payload, RunError,
    StoreConnection, StoreError, Subscription, TiingoConfig,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct InMemoryStore {
    assets: Vec<Asset>,
}

#[async_trait]
impl AssetStore for InMemoryStore {
    async fn acquire(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        Ok(Box::new(InMemoryConnection {
            assets: self.assets.clone(),
        }))
    }
}

struct InMemoryConnection {
    assets: Vec<Asset>,
}

#[async_trait]
impl StoreConnection for InMemoryConnection {
    async fn active_assets(&mut self, _dataset: Option<&str>) -> Result<Vec<Asset>, StoreError> {
        Ok(self.assets.clone())
    }
}

fn active_asset(ticker: &str, figi: &str) -> Asset {
    Asset {
        ticker: ticker.to_string(),
        primary_exchange: Exchange::Nyse,
        asset_type: AssetType::CommonStock,
        price_currency: "USD".to_string(),
        listing_date: None,
        delisting_date: None,
        active: true,
        composite_figi: figi.to_string(),
        last_updated: Utc::now(),
    }
}

fn subscription() -> Subscription {
    Subscription::new("sub-eod", "tiingo-eod")
        .with_config_value("apiKey", "test-token")
        .with_config_value("rateLimit", "60000")
}

async fn drain(mut rx: mpsc::Receiver<Observation>) -> Vec<EodQuote> {
    let mut quotes = Vec::new();
    while let Some(observation) = rx.recv().await {
        match observation.payload {
            Payload::EodQuote(quote) => quotes.push(quote),
            Payload::Asset(_) => panic!("EOD run must only emit quotes"),
        }
    }
    quotes
}

#[tokio::test]
async fn normalizes_bars_to_the_exchange_market_close() {
    let server = MockServer::start().await;

    let bars = json!([
        {
            "date": "2024-03-01T00:00:00.000Z",
            "open": 179.55,
            "high": 180.53,
            "low": 177.38,
            "close": 179.66,
            "volume": 73488000.0,
            "divCash": 0.0,
            "splitFactor": 1.0
        },
        {
            // Same trading date again: must not be emitted twice.
            "date": "2024-03-01T12:30:00.000Z",
            "open": 1.0,
            "high": 1.0,
            "low": 1.0,
            "close": 1.0,
            "volume": 1.0,
            "divCash": 0.0,
            "splitFactor": 1.0
        },
        {
            "date": "2024-03-04T00:00:00.000Z",
            "open": 180.11,
            "high": 181.0,
            "low": 179.26,
            "close": 180.74,
            "volume": 58231000.0,
            "divCash": 0.24,
            "splitFactor": 1.0
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/tiingo/daily/AAPL/prices"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bars))
        .mount(&server)
        .await;

    // The class share is requested in provider notation and rejected; the
    // run skips it and keeps going.
    Mock::given(method("GET"))
        .and(path("/tiingo/daily/BRK.A/prices"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryStore {
        assets: vec![
            active_asset("BRK/A", "FIGI-BRK"),
            active_asset("AAPL", "FIGI-AAPL"),
        ],
    });

    let config = TiingoConfig::new("test-token").with_eod_base_url(server.uri());
    let run = EodRun::new(config, store).unwrap();

    let (obs_tx, obs_rx) = mpsc::channel(64);
    let (sum_tx, mut sum_rx) = mpsc::channel(1);

    run.execute(&subscription(), obs_tx, sum_tx, CancellationToken::new())
        .await
        .unwrap();

    let quotes = drain(obs_rx).await;
    let summary = sum_rx.recv().await.unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(summary.num_observations, 2);

    let first = &quotes[0];
    assert_eq!(first.ticker, "AAPL");
    assert_eq!(first.composite_figi, "FIGI-AAPL");

    // The provider's midnight-UTC stamp lands on 16:00 exchange-local.
    let close = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    assert_eq!(first.date.naive_local(), close);
    assert_eq!(first.date.offset().local_minus_utc(), -5 * 3600);

    // Price fields copied verbatim.
    assert_eq!(first.open, dec!(179.55));
    assert_eq!(first.high, dec!(180.53));
    assert_eq!(first.low, dec!(177.38));
    assert_eq!(first.close, dec!(179.66));
    assert_eq!(first.volume, dec!(73488000));
    assert_eq!(first.dividend, dec!(0));
    assert_eq!(first.split_factor, dec!(1));

    let second = &quotes[1];
    assert_eq!(second.dividend, dec!(0.24));
    assert_eq!(
        second.date.date_naive(),
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    );
}

#[tokio::test]
async fn unparseable_bar_dates_are_skipped() {
    let server = MockServer::start().await;

    let bars = json!([
        {
            "date": "yesterday",
            "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0,
            "volume": 1.0, "divCash": 0.0, "splitFactor": 1.0
        },
        {
            "date": "2024-03-04T00:00:00.000Z",
            "open": 2.0, "high": 2.0, "low": 2.0, "close": 2.0,
            "volume": 2.0, "divCash": 0.0, "splitFactor": 1.0
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/tiingo/daily/AAPL/prices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bars))
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryStore {
        assets: vec![active_asset("AAPL", "FIGI-AAPL")],
    });

    let config = TiingoConfig::new("test-token").with_eod_base_url(server.uri());
    let run = EodRun::new(config, store).unwrap();

    let (obs_tx, obs_rx) = mpsc::channel(8);
    let (sum_tx, mut sum_rx) = mpsc::channel(1);

    run.execute(&subscription(), obs_tx, sum_tx, CancellationToken::new())
        .await
        .unwrap();

    let quotes = drain(obs_rx).await;
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].close, dec!(2));
    assert_eq!(sum_rx.recv().await.unwrap().num_observations, 1);
}

#[tokio::test]
async fn transport_failure_aborts_the_run_but_still_reports() {
    // Nothing listens here: connection refused on the first instrument.
    let config = TiingoConfig::new("test-token").with_eod_base_url("http://127.0.0.1:1");

    let store = Arc::new(InMemoryStore {
        assets: vec![active_asset("AAPL", "FIGI-AAPL")],
    });
    let run = EodRun::new(config, store).unwrap();

    let (obs_tx, _obs_rx) = mpsc::channel(8);
    let (sum_tx, mut sum_rx) = mpsc::channel(1);

    let result = run
        .execute(&subscription(), obs_tx, sum_tx, CancellationToken::new())
        .await;

    assert!(matches!(result, Err(RunError::Source(_))));

    let summary = sum_rx.recv().await.unwrap();
    assert_eq!(summary.num_observations, 0);
}

#[tokio::test]
async fn invalid_rate_limit_is_a_configuration_error() {
    let store = Arc::new(InMemoryStore { assets: vec![] });
    let run = EodRun::new(TiingoConfig::new("test-token"), store).unwrap();

    let bad_subscription = Subscription::new("sub-eod", "tiingo-eod")
        .with_config_value("apiKey", "test-token")
        .with_config_value("rateLimit", "fast");

    let (obs_tx, _obs_rx) = mpsc::channel(8);
    let (sum_tx, mut sum_rx) = mpsc::channel(1);

    let result = run
        .execute(&bad_subscription, obs_tx, sum_tx, CancellationToken::new())
        .await;

    assert!(matches!(result, Err(RunError::Config(_))));
    assert!(sum_rx.recv().await.is_some());
}
