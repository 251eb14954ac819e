// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Tiingo Connector - Security Master and EOD Ingestion
//!
//! A data-ingestion connector that pulls the Tiingo security master and
//! end-of-day price observations, normalizes them to the internal schema,
//! reconciles the incoming asset list against the previously known active
//! set, and streams the results to a downstream consumer together with a
//! per-run summary.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Catalog decision logic and data types
//!   - `asset`: Normalized instrument records
//!   - `observation`: Output envelope and run summary
//!   - `symbology`: Ticker translation and share-class filtering
//!   - `normalize`: Catalog normalization with the delisting grace period
//!   - `reconcile`: Active-set reconciliation keyed on composite FIGIs
//!
//! - **Application**: Dataset runs and port definitions
//!   - `ports`: Interfaces for the storage and enrichment collaborators
//!   - `catalog_run` / `eod_run`: The two independent run entry points
//!   - `reporter`: Run summary accounting
//!
//! - **Infrastructure**: Adapters and ambient plumbing
//!   - `tiingo`: HTTP adapter (catalog archive, daily prices)
//!   - `config`: Subscription configuration
//!   - `rate_limit`: Per-run request pacing
//!   - `telemetry` / `metrics`: Tracing and metric registration
//!
//! # Data Flow
//!
//! ```text
//! catalog.zip ──► normalize ──► enrich ──► reconcile ──┐
//!                                                      ├──► Observations ──► consumer
//! daily prices ──► market-close normalization ─────────┘          │
//!                                                            RunSummary
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core catalog and pricing logic with no I/O.
pub mod domain;

/// Application layer - Dataset runs and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and ambient plumbing.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::asset::{Asset, AssetType, Exchange};
pub use domain::normalize::{CatalogNormalizer, NormalizerConfig, RawCatalogRecord};
pub use domain::observation::{EodQuote, Observation, Payload, RunSummary};
pub use domain::reconcile::{ActiveSetReconciler, Reconciliation};
pub use domain::symbology::{SymbolTranslator, TickerFilter};

// Dataset runs
pub use application::catalog_run::CatalogRun;
pub use application::eod_run::EodRun;
pub use application::error::RunError;
pub use application::reporter::RunReporter;

// Collaborator ports
pub use application::ports::{AssetStore, EnrichError, FigiEnricher, StoreConnection, StoreError};

// Infrastructure
pub use infrastructure::config::{ConfigError, DEFAULT_RATE_LIMIT, Subscription};
pub use infrastructure::metrics::register_metrics;
pub use infrastructure::rate_limit::RateLimiter;
pub use infrastructure::telemetry::init as init_telemetry;
pub use infrastructure::tiingo::{RawEodBar, TiingoClient, TiingoConfig, TiingoError};
