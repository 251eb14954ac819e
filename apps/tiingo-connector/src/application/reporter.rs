//! Run summary accounting.

use chrono::Utc;
use tokio::sync::mpsc;

use crate::domain::observation::RunSummary;
use crate::infrastructure::config::Subscription;

/// Accumulates the [`RunSummary`] for one dataset run.
///
/// Created when the run starts; [`finish`](Self::finish) stamps the end
/// time and delivers the summary on the completion channel. Callers invoke
/// `finish` on every exit path so exactly one summary leaves the run,
/// whether it succeeded, failed or was cancelled.
#[derive(Debug)]
pub struct RunReporter {
    summary: RunSummary,
    completion: mpsc::Sender<RunSummary>,
}

impl RunReporter {
    /// Start accounting for a run owned by `subscription`.
    #[must_use]
    pub fn begin(subscription: &Subscription, completion: mpsc::Sender<RunSummary>) -> Self {
        let now = Utc::now();
        Self {
            summary: RunSummary {
                subscription_id: subscription.id.clone(),
                subscription_name: subscription.name.clone(),
                start_time: now,
                end_time: now,
                num_observations: 0,
            },
            completion,
        }
    }

    /// Count one delivered observation.
    pub const fn record_observation(&mut self) {
        self.summary.num_observations += 1;
    }

    /// Observations counted so far.
    #[must_use]
    pub const fn observations(&self) -> usize {
        self.summary.num_observations
    }

    /// Stamp the end time and deliver the summary.
    pub async fn finish(mut self) {
        self.summary.end_time = Utc::now();

        tracing::info!(
            subscription = %self.summary.subscription_name,
            observations = self.summary.num_observations,
            "run finished"
        );

        if self.completion.send(self.summary).await.is_err() {
            tracing::warn!("completion channel closed before the run summary could be delivered");
        }
    }
}
