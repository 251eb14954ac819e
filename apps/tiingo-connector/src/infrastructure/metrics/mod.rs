//! Connector metrics.
//!
//! Metric names and recording helpers built on the `metrics` facade. The
//! host process installs the recorder/exporter; without one these calls are
//! no-ops.

use metrics::{counter, describe_counter};

/// Total observations delivered downstream, labeled by payload kind.
pub const OBSERVATIONS_EMITTED: &str = "tiingo_observations_emitted_total";

/// Catalog candidates dropped because no composite FIGI was resolved.
pub const UNRESOLVED_FIGI: &str = "tiingo_catalog_unresolved_figi_total";

/// Describe the connector's metrics once at startup.
pub fn register_metrics() {
    describe_counter!(
        OBSERVATIONS_EMITTED,
        "Total observations delivered to the downstream consumer"
    );
    describe_counter!(
        UNRESOLVED_FIGI,
        "Catalog candidates excluded because identifier enrichment resolved nothing"
    );
}

/// Count one delivered observation of the given payload kind.
pub fn record_observation(kind: &'static str) {
    counter!(OBSERVATIONS_EMITTED, "kind" => kind).increment(1);
}

/// Count catalog candidates dropped for lack of a composite FIGI.
pub fn record_unresolved(count: u64) {
    counter!(UNRESOLVED_FIGI).increment(count);
}
