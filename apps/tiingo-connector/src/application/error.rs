//! Run-level error taxonomy.
//!
//! Everything here is fatal to its run: the run stops, the summary is still
//! emitted with whatever count had accumulated. Per-record problems are
//! logged and skipped at the point they occur and never become a
//! [`RunError`].

use thiserror::Error;

use crate::application::ports::{EnrichError, StoreError};
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::tiingo::TiingoError;

/// Fatal run outcome.
#[derive(Debug, Error)]
pub enum RunError {
    /// Subscription configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Time-zone data for the exchange zone is unavailable.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// A ticker-filter pattern failed to compile.
    #[error("ticker filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The provider adapter failed (transport, status, archive, table).
    #[error("provider error: {0}")]
    Source(#[from] TiingoError),

    /// The storage collaborator failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The identifier-enrichment collaborator failed.
    #[error("enrichment error: {0}")]
    Enrich(#[from] EnrichError),

    /// The downstream consumer dropped the observation channel.
    #[error("downstream consumer closed the observation channel")]
    OutputClosed,

    /// The run's cancellation signal fired.
    #[error("run cancelled")]
    Cancelled,
}
