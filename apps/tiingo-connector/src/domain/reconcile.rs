//! Active-set reconciliation.
//!
//! Diffs the freshly normalized and enriched candidate catalog against the
//! previously known active set. Matching is keyed on the composite FIGI:
//! a previously active instrument whose FIGI is absent from the candidates
//! has been delisted, whether or not the provider reported it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::asset::Asset;

/// Outcome of reconciling one catalog download.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Assets to emit: candidates with a resolved FIGI plus instruments
    /// newly marked inactive. Every entry carries a non-empty FIGI.
    pub assets: Vec<Asset>,
    /// Candidates dropped because identifier enrichment resolved nothing.
    pub unresolved: usize,
}

/// Diffs candidate catalogs against the previously known active set.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSetReconciler {
    zone: Tz,
}

impl ActiveSetReconciler {
    /// Create a reconciler stamping delistings in the given exchange zone.
    #[must_use]
    pub const fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Reconcile the candidate set against the previously active set.
    ///
    /// Candidates without a FIGI are excluded from matching and from the
    /// output: identity by ticker alone is unreliable, so an asset that
    /// never resolves an identifier is dropped from this run (counted in
    /// [`Reconciliation::unresolved`]). Previously active instruments
    /// absent from the candidates are marked inactive as of `now` and
    /// appended to the output.
    #[must_use]
    pub fn reconcile(
        &self,
        candidates: Vec<Asset>,
        previously_active: Vec<Asset>,
        now: DateTime<Utc>,
    ) -> Reconciliation {
        let mut unresolved = 0usize;
        let mut known: HashSet<String> = HashSet::with_capacity(candidates.len());

        for candidate in &candidates {
            if candidate.has_figi() {
                known.insert(candidate.composite_figi.clone());
            } else {
                unresolved += 1;
                tracing::debug!(ticker = %candidate.ticker, "no composite FIGI resolved, excluding from catalog");
            }
        }

        let delisted_at = now.with_timezone(&self.zone).fixed_offset();
        let mut assets: Vec<Asset> = candidates.into_iter().filter(Asset::has_figi).collect();

        for mut previous in previously_active {
            // Without an identifier the instrument can never be matched, so
            // it is never emitted either.
            if !previous.has_figi() {
                continue;
            }

            if !known.contains(&previous.composite_figi) {
                previous.mark_delisted(delisted_at);
                assets.push(previous);
            }
        }

        Reconciliation { assets, unresolved }
    }
}
