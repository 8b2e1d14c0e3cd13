use std::time::Duration;

use bon::Builder;
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::{
    api::hotspot,
    core::setup::{SetupProgress, SetupStatus, Transition},
    prelude::*,
};

/// Follows a hotspot setup by polling the realtime status until it settles.
#[derive(Builder)]
pub struct SetupMonitor<'a> {
    api: &'a hotspot::Api,

    #[builder(into)]
    hotspot_id: String,

    #[builder(default = SetupStatus::Pending)]
    initial_status: SetupStatus,

    #[builder(into)]
    poll_interval: Duration,

    #[builder(into)]
    timeout: Duration,
}

impl SetupMonitor<'_> {
    /// Poll until the setup turns `active` or `failed`, and return that status.
    ///
    /// A failed status request is logged and polled again on the next tick.
    #[instrument(skip_all, fields(hotspot_id = %self.hotspot_id))]
    pub async fn run(self) -> Result<SetupStatus> {
        let mut progress = SetupProgress::new(self.initial_status);
        let deadline = Instant::now() + self.timeout;

        let mut interval = interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !progress.is_done() {
            interval.tick().await;
            ensure!(
                Instant::now() < deadline,
                "hotspot setup is still `{}` after {}",
                progress.current(),
                humantime::format_duration(self.timeout),
            );

            let state = match self.api.status(&self.hotspot_id).await {
                Ok(status) => status.status,
                Err(error) => {
                    warn!("failed to poll the status: {error:#}");
                    continue;
                }
            };
            let Some(observed) = state.setup_status() else {
                debug!(?state, "not a setup status");
                continue;
            };
            match progress.observe(observed) {
                Transition::Advanced { from, to } => info!(%from, %to, "advanced"),
                Transition::Unchanged => debug!(status = %observed, "unchanged"),
                Transition::Ignored { current, observed } => {
                    warn!(%current, %observed, "ignoring the out-of-order status");
                }
            }
        }

        Ok(progress.current())
    }
}
