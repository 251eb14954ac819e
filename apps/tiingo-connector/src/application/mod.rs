//! Application layer - Dataset runs and port definitions.

pub mod catalog_run;
pub mod eod_run;
pub mod error;
pub mod ports;
pub mod reporter;

use chrono_tz::Tz;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::asset::Exchange;
use crate::domain::observation::Observation;
use error::RunError;

/// Resolve the exchange-local time zone shared by the supported venues.
///
/// Runs once during run construction so missing zone data surfaces as a
/// fatal initialization error instead of failing mid-pipeline.
pub(crate) fn exchange_zone() -> Result<Tz, RunError> {
    let name = Exchange::Nyse.time_zone_name();
    name.parse::<Tz>()
        .map_err(|_| RunError::UnknownTimeZone(name.to_string()))
}

/// Deliver one observation downstream, racing the cancellation signal.
///
/// The output channel is bounded; a full channel blocks the run until the
/// consumer catches up or the run is cancelled.
pub(crate) async fn send_observation(
    out: &mpsc::Sender<Observation>,
    observation: Observation,
    cancel: &CancellationToken,
) -> Result<(), RunError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(RunError::Cancelled),
        sent = out.send(observation) => sent.map_err(|_| RunError::OutputClosed),
    }
}
