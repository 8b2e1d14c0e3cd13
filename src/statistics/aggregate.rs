use std::collections::HashMap;

use serde::Serialize;

use crate::{
    fmt::serialize_two_decimals,
    quantity::{bandwidth::Gigabytes, tokens::Kxt},
    statistics::StatsMap,
};

/// Totals across all hotspots for one period.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AggregatedPoint {
    pub period: String,

    #[serde(rename = "bandwidthUsedGB", serialize_with = "serialize_two_decimals")]
    pub bandwidth_used: Gigabytes,

    #[serde(serialize_with = "serialize_two_decimals")]
    pub earnings: Kxt,
}

/// Sum bandwidth and earnings per period, keeping periods in the order they first appear.
pub fn aggregate(stats_map: &StatsMap) -> Vec<AggregatedPoint> {
    let mut points: Vec<AggregatedPoint> = Vec::new();
    let mut indices: HashMap<&str, usize> = HashMap::new();

    for point in stats_map.present().flat_map(|stats| &stats.stats) {
        let period = point.period();
        let index = *indices.entry(period).or_insert_with(|| {
            points.push(AggregatedPoint {
                period: period.to_owned(),
                bandwidth_used: Gigabytes::zero(),
                earnings: Kxt::zero(),
            });
            points.len() - 1
        });
        points[index].bandwidth_used += point.bandwidth_used;
        points[index].earnings += point.earnings;
    }

    points
}
