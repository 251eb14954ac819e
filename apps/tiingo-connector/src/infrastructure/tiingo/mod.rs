//! Tiingo HTTP adapter.
//!
//! Downloads the supported-tickers archive (zip containing one CSV table)
//! and per-instrument daily price bars. Base URLs are configuration so
//! tests can point the client at a local mock server.

mod client;
mod config;
mod error;
mod messages;

pub use client::TiingoClient;
pub use config::TiingoConfig;
pub use error::TiingoError;
pub use messages::RawEodBar;
