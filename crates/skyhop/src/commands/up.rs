use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use skyhop_cloud::{
    ComputeApi, Ensured, FirewallRule, InstanceSpec, PollingPolicy, ensure_firewall,
    provision_instance, relay, wait_for_external_address,
};
use skyhop_cloud_gce::GceClient;

#[derive(Args)]
pub struct UpArgs {
    /// Zone to provision into
    #[arg(long, env = "SKYHOP_ZONE", default_value = "us-west1-b")]
    pub zone: String,

    /// Instance name
    #[arg(long, default_value = "base-vm")]
    pub instance: String,

    /// Firewall rule name (also used as the instance's network tag)
    #[arg(long, default_value = "allow-5000")]
    pub firewall: String,

    /// TCP port the firewall opens and the service listens on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    #[arg(long, default_value = "e2-medium")]
    pub machine_type: String,

    /// Image family to boot from
    #[arg(long, default_value = "ubuntu-2204-lts")]
    pub image_family: String,

    /// Project hosting the image family
    #[arg(long, default_value = "ubuntu-os-cloud")]
    pub image_project: String,

    /// Startup script file, passed to the instance as opaque text
    #[arg(long)]
    pub startup_script: Option<PathBuf>,
}

pub async fn handle(client: GceClient, args: &UpArgs) -> anyhow::Result<()> {
    let policy = PollingPolicy::operation();
    println!(
        "{}",
        format!("Bringing up '{}' in {} ...", args.instance, args.zone).blue()
    );

    // Firewall and instance are independent, but the reference flow
    // settles the firewall first so the instance is reachable the
    // moment it gets an address.
    let rule = FirewallRule::allow_tcp(&args.firewall, args.port);
    match ensure_firewall(&client, &rule, &policy).await? {
        Ensured::Created => println!("{} firewall '{}' created", "✓".green(), args.firewall),
        Ensured::Existing => {
            println!("{} firewall '{}' already exists", "✓".green(), args.firewall)
        }
    }

    let image = client
        .image_from_family(&args.image_project, &args.image_family)
        .await?;

    let mut builder = InstanceSpec::builder(&args.instance, &args.machine_type)
        .image(image)
        .tag(&args.firewall);
    if let Some(path) = &args.startup_script {
        let script = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading startup script {}", path.display()))?;
        builder = builder.metadata(relay::keys::STARTUP_SCRIPT, script);
    }
    let spec = builder.build()?;

    let elapsed = provision_instance(&client, &args.zone, &spec, &policy).await?;
    if elapsed.is_zero() {
        println!("{} instance '{}' already exists", "✓".green(), args.instance);
    } else {
        println!(
            "{} instance '{}' created in {:.2}s",
            "✓".green(),
            args.instance,
            elapsed.as_secs_f64()
        );
    }

    println!("Waiting for external address ...");
    let address =
        wait_for_external_address(&client, &args.zone, &args.instance, &PollingPolicy::readiness())
            .await?;

    println!();
    println!(
        "{} http://{}:{}",
        "Visit:".green().bold(),
        address.cyan(),
        args.port
    );
    Ok(())
}
