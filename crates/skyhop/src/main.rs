mod commands;
mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use skyhop_cloud_gce::GceClient;

use commands::clone::CloneArgs;
use commands::relay::RelayArgs;
use commands::up::UpArgs;

#[derive(Parser)]
#[command(name = "skyhop")]
#[command(version)]
#[command(about = "Provision cloud VMs that can provision cloud VMs", long_about = None)]
struct Cli {
    /// Cloud project ID
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT", global = true)]
    project: Option<String>,

    /// OAuth2 access token for the provider API. Acquire it externally,
    /// e.g. `gcloud auth print-access-token`
    #[arg(long, env = "SKYHOP_ACCESS_TOKEN", global = true, hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring up the base VM: firewall, instance, external address
    Up(UpArgs),
    /// Snapshot the base VM's boot disk and clone a fleet from it
    Clone(CloneArgs),
    /// Launch a first-hop VM that provisions the second hop on its own
    Relay(RelayArgs),
}

impl Cli {
    fn client(&self) -> anyhow::Result<GceClient> {
        let project = self
            .project
            .clone()
            .context("project not set (use --project or GOOGLE_CLOUD_PROJECT)")?;
        let token = self
            .access_token
            .clone()
            .context("access token not set (use --access-token or SKYHOP_ACCESS_TOKEN)")?;
        Ok(GceClient::new(project, token))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Up(args) => commands::up::handle(cli.client()?, args).await,
        Commands::Clone(args) => commands::clone::handle(cli.client()?, args).await,
        Commands::Relay(args) => commands::relay::handle(cli.client()?, args).await,
    }
}
