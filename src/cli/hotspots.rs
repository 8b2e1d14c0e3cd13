use clap::{Parser, Subcommand};

use crate::{
    api::hotspot::HotspotDraft,
    cli::api::ApiArgs,
    prelude::*,
    tables::build_hotspots_table,
};

#[derive(Parser)]
pub struct HotspotsArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: HotspotsCommand,
}

impl HotspotsArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = self.api.hotspot_api()?;
        match self.command {
            HotspotsCommand::List => {
                println!("{}", build_hotspots_table(&api.list().await?));
            }
            HotspotsCommand::Show { id } => {
                println!("{}", build_hotspots_table(&[api.get(&id).await?]));
            }
            HotspotsCommand::Create(draft) => {
                let hotspot = api.create(&draft.into()).await?;
                info!(id = %hotspot.id, "created");
                println!("{}", build_hotspots_table(&[hotspot]));
            }
            HotspotsCommand::Update { id, draft } => {
                let hotspot = api.update(&id, &draft.into()).await?;
                println!("{}", build_hotspots_table(&[hotspot]));
            }
            HotspotsCommand::Delete { id } => {
                api.delete(&id).await?;
                info!(%id, "deleted");
            }
            HotspotsCommand::Status { id } => {
                let status = api.status(&id).await?;
                println!("{} ({}): {}", status.name, status.id, status.status);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum HotspotsCommand {
    /// List your hotspots.
    List,

    /// Show a single hotspot.
    Show { id: String },

    /// Register a new hotspot.
    Create(DraftArgs),

    /// Change a hotspot's name, location or bandwidth limit.
    Update {
        id: String,

        #[clap(flatten)]
        draft: DraftArgs,
    },

    /// Remove a hotspot.
    Delete { id: String },

    /// Realtime hotspot status.
    Status { id: String },
}

#[derive(Parser)]
struct DraftArgs {
    #[clap(long)]
    name: Option<String>,

    #[clap(long)]
    location: Option<String>,

    /// Bandwidth limit in Mbps.
    #[clap(long)]
    bandwidth_limit: Option<f64>,
}

impl From<DraftArgs> for HotspotDraft {
    fn from(args: DraftArgs) -> Self {
        Self::builder()
            .maybe_name(args.name)
            .maybe_location(args.location)
            .maybe_bandwidth_limit(args.bandwidth_limit)
            .build()
    }
}
