pub mod app;
pub mod commands;

pub use app::{Cli, Commands, GlobalArgs};

use anyhow::Result;

/// Run one parsed command; returns whether it succeeded
pub async fn run(cli: Cli) -> Result<bool> {
    let sfdc = commands::connect(&cli.global).await?;

    match cli.command {
        Commands::Create { record_type, data } => commands::record::create(&sfdc, &record_type, &data).await,
        Commands::Read { record_type, id } => commands::record::read(&sfdc, &record_type, id.as_deref()).await,
        Commands::Update { record_type, id, data } => {
            commands::record::update(&sfdc, &record_type, &id, &data).await
        }
        Commands::Delete { record_type, id } => commands::record::delete(&sfdc, &record_type, &id).await,
        Commands::ListMetadata { metadata_type, folder } => {
            commands::metadata::list_metadata(&sfdc, &metadata_type, folder.as_deref()).await
        }
        Commands::Send { method, path, data } => commands::send::send(&sfdc, &method, &path, data).await,
    }
}
