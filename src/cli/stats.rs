use clap::{Parser, Subcommand};

use crate::{
    cli::api::ApiArgs,
    core::range::StatsRange,
    prelude::*,
    statistics::aggregated_stats,
    tables::{build_aggregated_stats_table, build_hotspot_stats_table},
};

#[derive(Parser)]
pub struct StatsArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: StatsCommand,
}

impl StatsArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = self.api.hotspot_api()?;
        match self.command {
            StatsCommand::Aggregate { range, json } => {
                let points = aggregated_stats(&api, range).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&points)?);
                } else {
                    println!("{}", build_aggregated_stats_table(&points));
                }
            }
            StatsCommand::Hotspot { id, range } => {
                let stats = api.stats(&id, range).await?;
                println!(
                    "{} ({})",
                    stats.hotspot_id.as_deref().unwrap_or(&id),
                    stats.range.unwrap_or(range),
                );
                println!("{}", build_hotspot_stats_table(&stats));
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum StatsCommand {
    /// Bandwidth and earnings of all your hotspots, summed up per period.
    Aggregate {
        #[clap(long, env = "KONNECTX_STATS_RANGE", default_value = "monthly")]
        range: StatsRange,

        /// Print JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Bandwidth and earnings of a single hotspot.
    Hotspot {
        id: String,

        #[clap(long, env = "KONNECTX_STATS_RANGE", default_value = "monthly")]
        range: StatsRange,
    },
}
