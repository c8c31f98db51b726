//! dbup - Managed PostgreSQL provisioning for deploy pipelines

use clap::Parser;

use dbup_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
