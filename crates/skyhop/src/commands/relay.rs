use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use skyhop_cloud::{
    ComputeApi, InstanceSpec, PollingPolicy, RelayBundle, provision_instance,
};
use skyhop_cloud_gce::GceClient;

#[derive(Args)]
pub struct RelayArgs {
    /// Zone of the first-hop VM
    #[arg(long, env = "SKYHOP_ZONE", default_value = "us-west1-b")]
    pub zone: String,

    /// Name of the first-hop VM
    #[arg(long, default_value = "relay-vm1")]
    pub instance: String,

    #[arg(long, default_value = "e2-medium")]
    pub machine_type: String,

    /// Image family the first hop boots from
    #[arg(long, default_value = "ubuntu-2204-lts")]
    pub image_family: String,

    /// Project hosting the image family
    #[arg(long, default_value = "ubuntu-os-cloud")]
    pub image_project: String,

    /// Boot script for the first hop itself: fetches the bundle from
    /// the metadata endpoint and runs the launch code
    #[arg(long)]
    pub startup_script: PathBuf,

    /// Provisioning payload the first hop executes to create the
    /// second hop
    #[arg(long)]
    pub launch_code: PathBuf,

    /// Boot script relayed on to the second-hop VM
    #[arg(long)]
    pub relay_startup_script: PathBuf,

    /// Credential file relayed to the first hop
    #[arg(long)]
    pub credentials: PathBuf,
}

async fn read_payload(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading relay payload {}", path.display()))
}

pub async fn handle(client: GceClient, args: &RelayArgs) -> anyhow::Result<()> {
    let policy = PollingPolicy::operation();
    println!(
        "{}",
        format!("Launching first hop '{}' in {} ...", args.instance, args.zone).blue()
    );

    let bundle = RelayBundle {
        startup_script: read_payload(&args.startup_script).await?,
        launch_code: read_payload(&args.launch_code).await?,
        relay_startup_script: read_payload(&args.relay_startup_script).await?,
        service_credentials: read_payload(&args.credentials).await?,
        project: client.project().to_string(),
    };

    let image = client
        .image_from_family(&args.image_project, &args.image_family)
        .await?;
    let spec = bundle
        .apply(InstanceSpec::builder(&args.instance, &args.machine_type).image(image))
        .build()?;

    let elapsed = provision_instance(&client, &args.zone, &spec, &policy).await?;
    if elapsed.is_zero() {
        println!("{} first hop '{}' already exists", "✓".green(), args.instance);
    } else {
        println!(
            "{} first hop '{}' created in {:.2}s",
            "✓".green(),
            args.instance,
            elapsed.as_secs_f64()
        );
    }

    // Fire-and-forget from here: the first hop's boot sequence pulls
    // the bundle and provisions the second hop with the relayed
    // credentials. There is no network path to observe that from here.
    println!(
        "The second hop will appear once '{}' finishes booting (~1-2 minutes).",
        args.instance
    );
    Ok(())
}
