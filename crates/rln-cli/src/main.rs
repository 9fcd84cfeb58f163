//! # rln CLI Entry Point
//!
//! Parses arguments, installs logging, and dispatches to handler modules.

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Rate-Limiting Nullifier toolchain.
///
/// Creates identities, computes room roots, and produces rate-limited
/// message proofs.
#[derive(Parser, Debug)]
#[command(name = "rln", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Identity generation and inspection.
    Identity(rln_cli::identity::IdentityArgs),
    /// Room membership operations.
    Group(rln_cli::group::GroupArgs),
    /// Assemble and prove a message.
    Prove(rln_cli::prove::ProveArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let output = match &cli.command {
        Commands::Identity(args) => rln_cli::identity::run(args)?,
        Commands::Group(args) => rln_cli::group::run(args)?,
        Commands::Prove(args) => rln_cli::prove::run(args).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
