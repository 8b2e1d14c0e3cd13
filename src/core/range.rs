use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Stats aggregation granularity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
    Daily,
    Weekly,
    Monthly,
}

impl StatsRange {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl Display for StatsRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
