use anyhow::Result;

use super::{parse_json, report};
use crate::api::Sfdc;

pub async fn create(sfdc: &Sfdc, record_type: &str, data: &str) -> Result<bool> {
    let record = parse_json(data)?;
    let outcome = sfdc.rest().sobject(record_type).create(&record).await?;
    Ok(report(outcome))
}

pub async fn read(sfdc: &Sfdc, record_type: &str, id: Option<&str>) -> Result<bool> {
    let outcome = sfdc.rest().sobject(record_type).read(id).await?;
    Ok(report(outcome.map(|body| pretty(&body))))
}

pub async fn update(sfdc: &Sfdc, record_type: &str, id: &str, data: &str) -> Result<bool> {
    let record = parse_json(data)?;
    let outcome = sfdc.rest().sobject(record_type).update(id, &record).await?;
    Ok(report(outcome))
}

pub async fn delete(sfdc: &Sfdc, record_type: &str, id: &str) -> Result<bool> {
    let outcome = sfdc.rest().sobject(record_type).delete(id).await?;
    Ok(report(outcome))
}

/// Pretty-print JSON bodies, pass anything else through
fn pretty(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|json| serde_json::to_string_pretty(&json))
        .unwrap_or_else(|_| body.to_string())
}
