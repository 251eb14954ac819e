//! Ports for the external collaborators.
//!
//! The storage/catalog service and the identifier-enrichment service are
//! owned by other systems; the connector only consumes these contracts.
//! Infrastructure adapters (or test doubles) implement them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::asset::Asset;

/// Storage collaborator error.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A connection could not be acquired from the pool.
    #[error("could not acquire store connection: {message}")]
    Acquire {
        /// Error details.
        message: String,
    },

    /// A query against the store failed.
    #[error("store query failed: {message}")]
    Query {
        /// Error details.
        message: String,
    },
}

/// Identifier-enrichment collaborator error.
#[derive(Debug, Clone, Error)]
pub enum EnrichError {
    /// The batch enrichment call failed.
    #[error("identifier enrichment failed: {message}")]
    Failed {
        /// Error details.
        message: String,
    },
}

/// Storage collaborator: source of the previously known active set.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Acquire a pooled connection for the duration of one run.
    ///
    /// The connection is released when the returned handle is dropped, so
    /// every exit path of a run releases it exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Acquire`] when no connection is available.
    async fn acquire(&self) -> Result<Box<dyn StoreConnection>, StoreError>;
}

/// A scoped store connection.
#[async_trait]
pub trait StoreConnection: Send {
    /// Fetch the instruments currently believed active, optionally scoped
    /// to a named dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] when the store cannot answer.
    async fn active_assets(&mut self, dataset: Option<&str>) -> Result<Vec<Asset>, StoreError>;
}

/// Identifier-enrichment collaborator.
#[async_trait]
pub trait FigiEnricher: Send + Sync {
    /// Attach composite FIGIs to a batch of assets in place.
    ///
    /// Assets for which no identifier resolves keep an empty FIGI; that is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Failed`] when the batch call itself fails.
    async fn enrich(&self, assets: &mut [Asset]) -> Result<(), EnrichError>;
}
