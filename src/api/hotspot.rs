mod models;

use reqwest::Method;

pub use self::models::{
    AvailableDevice,
    Hotspot,
    HotspotDraft,
    HotspotStats,
    RealtimeStatus,
    SetupStarted,
};
use crate::{
    api::{
        Client,
        hotspot::models::{HotspotList, StartSetupRequest},
    },
    core::{range::StatsRange, setup::SetupCode},
    prelude::*,
};

/// Hotspot endpoints.
#[derive(Clone)]
pub struct Api {
    client: Client,
}

impl Api {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Hotspot>> {
        info!("fetching hotspots…");
        let HotspotList(hotspots) = self
            .client
            .call(self.client.request(Method::GET, &["hotspots"]), "Failed to fetch hotspots")
            .await?;
        info!(n_hotspots = hotspots.len(), "fetched");
        Ok(hotspots)
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn get(&self, id: &str) -> Result<Hotspot> {
        self.client
            .call(self.client.request(Method::GET, &["hotspots", id]), "Failed to fetch the hotspot")
            .await
    }

    #[instrument(skip_all)]
    pub async fn create(&self, draft: &HotspotDraft) -> Result<Hotspot> {
        ensure!(draft.name.is_some(), "a new hotspot needs a name");
        info!(name = ?draft.name, "creating…");
        self.client
            .call(
                self.client.request(Method::POST, &["hotspots"]).json(draft),
                "Failed to create the hotspot",
            )
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn update(&self, id: &str, draft: &HotspotDraft) -> Result<Hotspot> {
        ensure!(!draft.is_empty(), "nothing to update");
        info!("updating…");
        self.client
            .call(
                self.client.request(Method::PUT, &["hotspots", id]).json(draft),
                "Failed to update the hotspot",
            )
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn delete(&self, id: &str) -> Result {
        info!("deleting…");
        self.client
            .send(
                self.client.request(Method::DELETE, &["hotspots", id]),
                "Failed to delete the hotspot",
            )
            .await
            .map(|_| ())
    }

    #[instrument(skip_all, fields(id = id, range = %range))]
    pub async fn stats(&self, id: &str, range: StatsRange) -> Result<HotspotStats> {
        debug!("fetching stats…");
        self.client
            .call(
                self.client.request_with_query(
                    Method::GET,
                    &["hotspots", id, "stats"],
                    &[("range", range.as_str())],
                ),
                "Failed to fetch hotspot stats",
            )
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn status(&self, id: &str) -> Result<RealtimeStatus> {
        self.client
            .call(
                self.client.request(Method::GET, &["hotspots", id, "status"]),
                "Failed to fetch the hotspot status",
            )
            .await
    }

    #[instrument(skip_all)]
    pub async fn available_devices(&self) -> Result<Vec<AvailableDevice>> {
        info!("scanning for devices…");
        self.client
            .call(
                self.client.request(Method::GET, &["hotspots", "setup", "available"]),
                "Failed to fetch available devices",
            )
            .await
    }

    #[instrument(skip_all, fields(setup_code = %setup_code))]
    pub async fn start_setup(&self, setup_code: &SetupCode) -> Result<SetupStarted> {
        info!("starting the setup…");
        let started: SetupStarted = self
            .client
            .call(
                self.client
                    .request(Method::POST, &["hotspots", "setup", "start"])
                    .json(&StartSetupRequest { setup_code }),
                "Failed to start the hotspot setup",
            )
            .await?;
        info!(hotspot_id = %started.hotspot_id, status = %started.setup_status, "started");
        Ok(started)
    }
}
