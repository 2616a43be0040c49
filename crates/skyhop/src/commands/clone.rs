use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use skyhop_cloud::{FleetSpec, PollingPolicy, clone_fleet, ensure_boot_disk_snapshot};
use skyhop_cloud_gce::GceClient;

use crate::report::{ReportContext, write_timing_report};

#[derive(Args)]
pub struct CloneArgs {
    /// Zone of the base instance and its clones
    #[arg(long, env = "SKYHOP_ZONE", default_value = "us-west1-b")]
    pub zone: String,

    /// Instance whose boot disk is snapshotted and cloned
    #[arg(long, default_value = "base-vm")]
    pub base_instance: String,

    #[arg(long, default_value = "e2-medium")]
    pub machine_type: String,

    /// Number of clones to create
    #[arg(long, default_value_t = 3)]
    pub count: u32,

    /// Prefix of the derived snapshot name
    #[arg(long, default_value = "base-snapshot")]
    pub snapshot_prefix: String,

    /// Network tag applied to every clone (keeps them behind the same
    /// firewall rule as the base)
    #[arg(long, default_value = "allow-5000")]
    pub network_tag: String,

    /// Where to write the timing report
    #[arg(long, default_value = "TIMING.md")]
    pub report: PathBuf,
}

pub async fn handle(client: GceClient, args: &CloneArgs) -> anyhow::Result<()> {
    let policy = PollingPolicy::operation();
    println!(
        "{}",
        format!(
            "Cloning {} instances from '{}' ...",
            args.count, args.base_instance
        )
        .blue()
    );

    let snapshot = ensure_boot_disk_snapshot(
        &client,
        &args.zone,
        &args.base_instance,
        &args.snapshot_prefix,
        &policy,
    )
    .await?;
    println!("{} snapshot '{}' ready", "✓".green(), snapshot.name);

    let fleet = FleetSpec {
        base_name: args.base_instance.clone(),
        count: args.count,
        machine_type: args.machine_type.clone(),
        tags: vec![args.network_tag.clone()],
    };
    let records = clone_fleet(&client, &args.zone, &snapshot, &fleet, &policy).await?;

    for record in &records {
        println!(
            "  {} {:.2}s",
            record.instance.cyan(),
            record.elapsed.as_secs_f64()
        );
    }

    let context = ReportContext {
        base_instance: &args.base_instance,
        zone: &args.zone,
        machine_type: &args.machine_type,
    };
    write_timing_report(&args.report, &context, &records).await?;
    println!("{} wrote {}", "✓".green(), args.report.display());

    Ok(())
}
