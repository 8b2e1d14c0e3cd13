use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use comfy_table::Color;
use serde::{Deserialize, Serialize};

use crate::quantity::tokens::Kxt;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default)]
    pub balance: Kxt,

    #[serde(default)]
    pub pending_rewards: Kxt,

    pub wallet_address: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: TransactionKind,

    #[serde(default)]
    pub amount: Kxt,

    #[serde(default)]
    pub status: String,

    pub created_at: DateTime<Utc>,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earning,
    Reward,
    Claim,
    Withdrawal,
    Subscription,

    #[default]
    #[serde(other)]
    Other,
}

impl TransactionKind {
    /// Whether the transaction brings tokens in.
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Earning | Self::Reward | Self::Claim)
    }

    pub const fn color(self) -> Color {
        if self.is_credit() { Color::Green } else { Color::Red }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Earning => write!(f, "Earning"),
            Self::Reward => write!(f, "Reward"),
            Self::Claim => write!(f, "Claim"),
            Self::Withdrawal => write!(f, "Withdrawal"),
            Self::Subscription => write!(f, "Subscription"),
            Self::Other => write!(f, "Other"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    #[serde(default)]
    pub total_earnings: Kxt,

    #[serde(default)]
    pub this_month: Kxt,

    #[serde(default)]
    pub last_month: Kxt,

    #[serde(default)]
    pub pending: Kxt,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MonthlyEarnings {
    pub month: String,

    #[serde(default)]
    pub earnings: Kxt,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EarningsTrendPoint {
    pub date: String,

    #[serde(default)]
    pub earnings: Kxt,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    #[serde(default)]
    pub claimed: Kxt,

    pub transaction_id: Option<String>,
}

#[derive(Serialize)]
pub struct WithdrawalRequest<'a> {
    pub amount: Kxt,
    pub address: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalReceipt {
    pub transaction_id: String,

    #[serde(default)]
    pub status: String,
}
