mod api;
mod hotspots;
mod session;
mod setup;
mod stats;
mod wallet;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        hotspots::HotspotsArgs,
        session::SessionCommandArgs,
        setup::SetupArgs,
        stats::StatsArgs,
        wallet::WalletArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse and manage your hotspots.
    #[clap(name = "hotspots")]
    Hotspots(Box<HotspotsArgs>),

    /// Bandwidth and earnings statistics.
    #[clap(name = "stats")]
    Stats(Box<StatsArgs>),

    /// Discover and provision new hotspot devices.
    #[clap(name = "setup")]
    Setup(Box<SetupArgs>),

    /// KXT balance, transactions, earnings, claims and withdrawals.
    #[clap(name = "wallet")]
    Wallet(Box<WalletArgs>),

    /// Local session: theme and sign-in.
    #[clap(name = "session")]
    Session(Box<SessionCommandArgs>),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Hotspots(args) => args.run().await,
            Self::Stats(args) => args.run().await,
            Self::Setup(args) => args.run().await,
            Self::Wallet(args) => args.run().await,
            Self::Session(args) => args.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_stats_aggregate() {
        let args = Args::try_parse_from([
            "konnectx",
            "stats",
            "--api-base-url",
            "http://example.com/api",
            "aggregate",
            "--range",
            "weekly",
        ]);
        assert!(args.is_ok());
    }

    #[test]
    fn rejects_bad_setup_code() {
        let args = Args::try_parse_from(["konnectx", "setup", "start", "not-a-code"]);
        assert!(args.is_err());
    }
}
