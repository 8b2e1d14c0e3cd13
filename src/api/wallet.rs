mod models;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

pub use self::models::{
    Balance,
    ClaimReceipt,
    EarningsSummary,
    EarningsTrendPoint,
    MonthlyEarnings,
    Transaction,
    WithdrawalReceipt,
};
use crate::{
    api::{Client, response::Envelope, wallet::models::WithdrawalRequest},
    prelude::*,
    quantity::tokens::Kxt,
};

/// Wallet endpoints, all of them wrapped into the `{ success, data, message }` envelope.
#[derive(Clone)]
pub struct Api {
    client: Client,
}

impl Api {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn balance(&self) -> Result<Balance> {
        self.call(
            self.client.request(Method::GET, &["wallet", "balance"]),
            "Failed to fetch the wallet balance",
        )
        .await
    }

    #[instrument(skip_all, fields(page = page, limit = limit))]
    pub async fn transactions(&self, page: u32, limit: u32) -> Result<Vec<Transaction>> {
        let (page, limit) = (page.to_string(), limit.to_string());
        self.call(
            self.client.request_with_query(
                Method::GET,
                &["wallet", "transactions"],
                &[("page", page.as_str()), ("limit", limit.as_str())],
            ),
            "Failed to fetch transactions",
        )
        .await
    }

    #[instrument(skip_all)]
    pub async fn earnings_summary(&self) -> Result<EarningsSummary> {
        self.call(
            self.client.request(Method::GET, &["wallet", "earnings", "summary"]),
            "Failed to fetch the earnings summary",
        )
        .await
    }

    #[instrument(skip_all)]
    pub async fn monthly_earnings(&self) -> Result<Vec<MonthlyEarnings>> {
        self.call(
            self.client.request(Method::GET, &["wallet", "earnings", "monthly"]),
            "Failed to fetch monthly earnings",
        )
        .await
    }

    #[instrument(skip_all, fields(days = days))]
    pub async fn earnings_trend(&self, days: u32) -> Result<Vec<EarningsTrendPoint>> {
        let days = days.to_string();
        self.call(
            self.client.request_with_query(
                Method::GET,
                &["wallet", "earnings", "trend"],
                &[("days", days.as_str())],
            ),
            "Failed to fetch the earnings trend",
        )
        .await
    }

    #[instrument(skip_all)]
    pub async fn claim(&self) -> Result<ClaimReceipt> {
        info!("claiming rewards…");
        let receipt: ClaimReceipt = self
            .call(self.client.request(Method::POST, &["wallet", "claim"]), "Failed to claim rewards")
            .await?;
        info!(claimed = %receipt.claimed, "claimed");
        Ok(receipt)
    }

    #[instrument(skip_all, fields(amount = %amount))]
    pub async fn withdraw(&self, amount: Kxt, address: &str) -> Result<WithdrawalReceipt> {
        ensure!(f64::from(amount).is_finite(), "the withdrawal amount must be finite");
        ensure!(amount.is_positive(), "the withdrawal amount must be positive");
        ensure!(!address.trim().is_empty(), "the withdrawal address must not be empty");
        info!("withdrawing…");
        self.call(
            self.client
                .request(Method::POST, &["wallet", "withdraw"])
                .json(&WithdrawalRequest { amount, address: address.trim() }),
            "Failed to withdraw",
        )
        .await
    }

    async fn call<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &'static str,
    ) -> Result<R> {
        self.client.call::<Envelope<R>>(request, fallback).await?.into_data(fallback)
    }
}
