mod aggregate;

use futures_util::future::join_all;
use itertools::Itertools;

pub use self::aggregate::{AggregatedPoint, aggregate};
use crate::{
    api::hotspot::{self, HotspotStats},
    core::range::StatsRange,
    prelude::*,
};

/// Per-hotspot stats in the order of the hotspot list, one entry per hotspot identifier.
///
/// A hotspot whose stats could not be fetched stays in the map with [`None`].
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct StatsMap(Vec<(String, Option<HotspotStats>)>);

impl StatsMap {
    #[cfg(test)]
    pub fn get(&self, hotspot_id: &str) -> Option<&HotspotStats> {
        self.0.iter().find(|(id, _)| id == hotspot_id).and_then(|(_, stats)| stats.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn n_failed(&self) -> usize {
        self.0.iter().filter(|(_, stats)| stats.is_none()).count()
    }

    /// Stats that were fetched successfully.
    pub fn present(&self) -> impl Iterator<Item = &HotspotStats> {
        self.0.iter().filter_map(|(_, stats)| stats.as_ref())
    }
}

impl FromIterator<(String, Option<HotspotStats>)> for StatsMap {
    /// Keeps the first entry of a repeated identifier.
    fn from_iter<T: IntoIterator<Item = (String, Option<HotspotStats>)>>(iter: T) -> Self {
        Self(iter.into_iter().unique_by(|(id, _)| id.clone()).collect())
    }
}

/// Fetch the stats of every hotspot concurrently.
///
/// A failing hotspot is logged and left out. Failing to list the hotspots fails the whole call.
/// A hotspot listed more than once is fetched and counted once.
#[instrument(skip_all, fields(range = %range))]
pub async fn fetch_all_stats(api: &hotspot::Api, range: StatsRange) -> Result<StatsMap> {
    let hotspots = api.list().await.context("Failed to fetch hotspot statistics")?;
    let fetches =
        hotspots.into_iter().unique_by(|hotspot| hotspot.id.clone()).map(|hotspot| async move {
            let stats = match api.stats(&hotspot.id, range).await {
                Ok(stats) => Some(stats),
                Err(error) => {
                    warn!(hotspot_id = %hotspot.id, "failed to fetch the stats: {error:#}");
                    None
                }
            };
            (hotspot.id, stats)
        });
    let stats_map: StatsMap = join_all(fetches).await.into_iter().collect();
    info!(n_hotspots = stats_map.len(), n_failed = stats_map.n_failed(), "fetched");
    Ok(stats_map)
}

/// Fetch the stats of every hotspot and sum them up per period.
pub async fn aggregated_stats(
    api: &hotspot::Api,
    range: StatsRange,
) -> Result<Vec<AggregatedPoint>> {
    Ok(aggregate(&fetch_all_stats(api, range).await?))
}
