use anyhow::Result;
use colored::*;

use crate::api::{ListMetadataQuery, Sfdc};

pub async fn list_metadata(sfdc: &Sfdc, metadata_type: &str, folder: Option<&str>) -> Result<bool> {
    let mut query = ListMetadataQuery::new(metadata_type);
    if let Some(folder) = folder {
        query = query.in_folder(folder);
    }

    let components = sfdc.metadata().list_metadata(&[query]).await?;

    if components.is_empty() {
        println!("{}", format!("No {} components found", metadata_type).dimmed());
        return Ok(true);
    }

    for component in &components {
        let modified = component
            .last_modified_date
            .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}  {}  {}",
            component.full_name.bright_white(),
            component.id.as_deref().unwrap_or("-").dimmed(),
            modified.dimmed()
        );
    }
    println!("📊 {} component(s)", components.len());

    Ok(true)
}
