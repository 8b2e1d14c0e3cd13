use std::fmt::{Display, Formatter};

use bon::Builder;
use chrono::{DateTime, Utc};
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, VecSkipError, serde_as};

use crate::{
    core::{
        range::StatsRange,
        setup::{SetupCode, SetupStatus},
        signal::SignalQuality,
    },
    quantity::{bandwidth::Gigabytes, tokens::Kxt},
};

/// Hotspot record. Only the identifier is required, a malformed optional field reads as absent.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub location: Option<String>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub status: HotspotState,

    /// Bandwidth limit in Mbps.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub bandwidth_limit: Option<f64>,

    /// Signal strength in dBm.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub signal_strength: Option<f64>,

    #[serde(default)]
    pub earnings: Kxt,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Hotspot {
    #[expect(clippy::cast_possible_truncation)]
    pub fn signal(&self) -> SignalQuality {
        self.signal_strength.map(|dbm| dbm.round() as i32).into()
    }
}

/// Hotspot list where a record that cannot be read at all is skipped.
#[serde_as]
#[derive(Deserialize)]
#[serde(transparent)]
pub struct HotspotList(#[serde_as(as = "VecSkipError<_>")] pub Vec<Hotspot>);

/// Create or update request body. Absent fields are left out of the request.
#[derive(Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotDraft {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit: Option<f64>,
}

impl HotspotDraft {
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none() && self.bandwidth_limit.is_none()
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotState {
    Pending,
    Starting,
    Configuring,
    Active,
    Online,
    Offline,
    Failed,

    #[default]
    #[serde(other)]
    Unknown,
}

impl HotspotState {
    /// Setup status this realtime state stands for, if any.
    pub const fn setup_status(self) -> Option<SetupStatus> {
        match self {
            Self::Pending => Some(SetupStatus::Pending),
            Self::Starting => Some(SetupStatus::Starting),
            Self::Configuring => Some(SetupStatus::Configuring),
            Self::Active | Self::Online => Some(SetupStatus::Active),
            Self::Failed => Some(SetupStatus::Failed),
            Self::Offline | Self::Unknown => None,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Active | Self::Online => Color::Green,
            Self::Pending | Self::Starting | Self::Configuring => Color::DarkYellow,
            Self::Offline | Self::Failed => Color::Red,
            Self::Unknown => Color::Reset,
        }
    }
}

impl Display for HotspotState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Starting => write!(f, "starting"),
            Self::Configuring => write!(f, "configuring"),
            Self::Active => write!(f, "active"),
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Stats of one hotspot. Aggregation only relies on the points, the echoed request is informative.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotStats {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub hotspot_id: Option<String>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub range: Option<StatsRange>,

    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub stats: Vec<StatsPoint>,
}

/// Usage of one hotspot over one period.
#[derive(Clone, Debug, Deserialize)]
pub struct StatsPoint {
    pub month: Option<String>,

    pub week: Option<String>,

    pub day: Option<String>,

    #[serde(default, rename = "bandwidthUsedGB")]
    pub bandwidth_used: Gigabytes,

    #[serde(default)]
    pub earnings: Kxt,
}

impl StatsPoint {
    /// Period key: the month label wins over the week, the week wins over the day.
    ///
    /// Empty labels count as absent.
    pub fn period(&self) -> &str {
        [&self.month, &self.week, &self.day]
            .into_iter()
            .filter_map(|label| label.as_deref())
            .find(|label| !label.is_empty())
            .unwrap_or("unknown")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RealtimeStatus {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub status: HotspotState,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDevice {
    #[serde_as(as = "DisplayFromStr")]
    pub setup_code: SetupCode,

    pub name: Option<String>,

    pub model: Option<String>,

    pub signal_strength: Option<i32>,
}

#[serde_as]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSetupRequest<'a> {
    #[serde_as(as = "DisplayFromStr")]
    pub setup_code: &'a SetupCode,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStarted {
    pub hotspot_id: String,

    pub setup_status: SetupStatus,
}
