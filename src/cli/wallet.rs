use clap::{Parser, Subcommand};

use crate::{
    cli::api::ApiArgs,
    prelude::*,
    quantity::tokens::Kxt,
    tables::{
        build_earnings_trend_table,
        build_monthly_earnings_table,
        build_transactions_table,
    },
};

#[derive(Parser)]
pub struct WalletArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: WalletCommand,
}

impl WalletArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = self.api.wallet_api()?;
        match self.command {
            WalletCommand::Balance => {
                let balance = api.balance().await?;
                println!("balance: {}", balance.balance);
                println!("pending: {}", balance.pending_rewards);
                if let Some(address) = balance.wallet_address {
                    println!("address: {address}");
                }
            }
            WalletCommand::Transactions { page, limit } => {
                println!("{}", build_transactions_table(&api.transactions(page, limit).await?));
            }
            WalletCommand::Summary => {
                let summary = api.earnings_summary().await?;
                println!("total:      {}", summary.total_earnings);
                println!("this month: {}", summary.this_month);
                println!("last month: {}", summary.last_month);
                println!("pending:    {}", summary.pending);
            }
            WalletCommand::Monthly => {
                println!("{}", build_monthly_earnings_table(&api.monthly_earnings().await?));
            }
            WalletCommand::Trend { days } => {
                println!("{}", build_earnings_trend_table(&api.earnings_trend(days).await?));
            }
            WalletCommand::Claim => {
                let receipt = api.claim().await?;
                println!("claimed: {}", receipt.claimed);
                if let Some(transaction_id) = receipt.transaction_id {
                    println!("transaction: {transaction_id}");
                }
            }
            WalletCommand::Withdraw { amount, address } => {
                let receipt = api.withdraw(amount, &address).await?;
                println!("{}: {}", receipt.transaction_id, receipt.status);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum WalletCommand {
    /// Current KXT balance.
    Balance,

    /// Transaction history.
    Transactions {
        #[clap(long, default_value = "1")]
        page: u32,

        #[clap(long, default_value = "20")]
        limit: u32,
    },

    /// Earnings summary.
    Summary,

    /// Earnings per month.
    Monthly,

    /// Daily earnings over the last days.
    Trend {
        #[clap(long, default_value = "30")]
        days: u32,
    },

    /// Claim pending rewards.
    Claim,

    /// Withdraw KXT to an external address.
    Withdraw {
        /// Amount in KXT.
        #[clap(long)]
        amount: Kxt,

        #[clap(long)]
        address: String,
    },
}
