use anyhow::Result;
use clap::Parser;
use log::info;

use sfdc_cli::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("sfdc-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting sfdc-cli");

    if !cli::run(cli).await? {
        std::process::exit(1);
    }

    Ok(())
}
