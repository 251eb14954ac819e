//! Security-master dataset run.
//!
//! Downloads the provider catalog, normalizes it, enriches the candidates
//! with composite FIGIs, reconciles them against the previously known
//! active set and streams one observation per resulting asset.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::RunError;
use super::ports::{AssetStore, FigiEnricher};
use super::reporter::RunReporter;
use super::{exchange_zone, send_observation};
use crate::domain::asset::Asset;
use crate::domain::normalize::{CatalogNormalizer, NormalizerConfig};
use crate::domain::observation::{Observation, RunSummary};
use crate::domain::reconcile::ActiveSetReconciler;
use crate::domain::symbology::{SymbolTranslator, TickerFilter};
use crate::infrastructure::config::Subscription;
use crate::infrastructure::metrics;
use crate::infrastructure::tiingo::{TiingoClient, TiingoConfig};

/// The catalog dataset run.
pub struct CatalogRun {
    client: TiingoClient,
    normalizer: CatalogNormalizer,
    reconciler: ActiveSetReconciler,
    store: Arc<dyn AssetStore>,
    enricher: Arc<dyn FigiEnricher>,
}

impl CatalogRun {
    /// Build a catalog run against the given collaborators.
    ///
    /// Performs the validated initialization phase: zone resolution, filter
    /// pattern compilation and HTTP client construction all happen here,
    /// before any I/O.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] when initialization fails.
    pub fn new(
        config: TiingoConfig,
        store: Arc<dyn AssetStore>,
        enricher: Arc<dyn FigiEnricher>,
    ) -> Result<Self, RunError> {
        let zone = exchange_zone()?;
        let filter = TickerFilter::new()?;
        let client = TiingoClient::new(config)?;

        Ok(Self {
            client,
            normalizer: CatalogNormalizer::new(
                NormalizerConfig::default(),
                SymbolTranslator::default(),
                filter,
                zone,
            ),
            reconciler: ActiveSetReconciler::new(zone),
            store,
            enricher,
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
            tracing::error!(%error, subscription = %subscription.name, "catalog run aborted");
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
        let now = Utc::now();

        let records = self.client.supported_tickers().await?;
        tracing::debug!(records = records.len(), "downloaded provider catalog");

        // Only instruments that come out of normalization still listed are
        // candidates for the active set; true delistings surface through
        // reconciliation below.
        let mut candidates: Vec<Asset> = records
            .iter()
            .filter_map(|raw| self.normalizer.normalize(raw, now))
            .filter(|asset| asset.active)
            .collect();

        tracing::debug!(candidates = candidates.len(), "enriching with composite FIGIs");
        self.enricher.enrich(&mut candidates).await?;

        let mut connection = self.store.acquire().await?;
        let previously_active = connection
            .active_assets(subscription.dataset.as_deref())
            .await?;

        let reconciliation = self
            .reconciler
            .reconcile(candidates, previously_active, now);

        if reconciliation.unresolved > 0 {
            tracing::debug!(
                unresolved = reconciliation.unresolved,
                "candidates dropped without a composite FIGI"
            );
            metrics::record_unresolved(reconciliation.unresolved as u64);
        }

        for asset in reconciliation.assets {
            let observation = Observation::asset(asset, &subscription.id, &subscription.name);
            send_observation(out, observation, cancel).await?;
            reporter.record_observation();
            metrics::record_observation("asset");
        }

        Ok(())
    }
}
