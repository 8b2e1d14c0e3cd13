use clap::{Parser, Subcommand};

use crate::{
    cli::api::ApiArgs,
    core::setup::{SetupCode, SetupStatus},
    prelude::*,
    provisioning::SetupMonitor,
    tables::build_devices_table,
};

#[derive(Parser)]
pub struct SetupArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: SetupCommand,
}

impl SetupArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = self.api.hotspot_api()?;
        match self.command {
            SetupCommand::Available => {
                println!("{}", build_devices_table(&api.available_devices().await?));
            }
            SetupCommand::Start(args) => {
                let started = api.start_setup(&args.setup_code).await?;
                if args.no_wait {
                    println!("{}: {}", started.hotspot_id, started.setup_status);
                    return Ok(());
                }
                let status = SetupMonitor::builder()
                    .api(&api)
                    .hotspot_id(started.hotspot_id.clone())
                    .initial_status(started.setup_status)
                    .poll_interval(args.poll_interval)
                    .timeout(args.setup_timeout)
                    .build()
                    .run()
                    .await?;
                println!("{}: {status}", started.hotspot_id);
                ensure!(status == SetupStatus::Active, "hotspot setup failed");
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum SetupCommand {
    /// Devices nearby that are ready to be set up.
    Available,

    /// Bind a device to a new hotspot and follow the setup until it settles.
    Start(StartArgs),
}

#[derive(Parser)]
struct StartArgs {
    /// Setup code printed on the device, like `AA:BB:CC:DD:EE:FF`.
    setup_code: SetupCode,

    /// Do not wait for the setup to finish.
    #[clap(long)]
    no_wait: bool,

    #[clap(long, env = "KONNECTX_SETUP_POLL_INTERVAL", default_value = "2s")]
    poll_interval: humantime::Duration,

    #[clap(long, env = "KONNECTX_SETUP_TIMEOUT", default_value = "2min")]
    setup_timeout: humantime::Duration,
}
