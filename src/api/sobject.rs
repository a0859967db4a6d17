//! Record (sObject) CRUD for a single record type

use anyhow::Context;
use log::{debug, warn};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::client::RestClient;
use super::constants::status;
use super::endpoint;
use super::error::ApiError;
use super::outcome::RecordOutcome;
use super::transport::HttpResponse;

/// Accessor bound to one record-type label.
///
/// The label is fixed for the lifetime of the value; [`with_label`](Self::with_label)
/// returns a new accessor instead of retargeting this one.
#[derive(Clone)]
pub struct RecordAccessor {
    client: RestClient,
    label: String,
}

impl RecordAccessor {
    pub(crate) fn new(client: RestClient, label: impl Into<String>) -> Self {
        Self {
            client,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Same session, different record type
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self::new(self.client.clone(), label)
    }

    /// URL for this record type, or one record when `id` is given
    pub fn url(&self, id: Option<&str>) -> String {
        let session = self.client.session();
        endpoint::resolve(session.base_url(), session.api_version(), &self.label, id)
    }

    /// Create a record; success carries the new record's identifier
    pub async fn create<R: Serialize + ?Sized>(&self, record: &R) -> anyhow::Result<RecordOutcome<String>> {
        let body = serialize_record(record)?;
        let response = self.client.execute(Method::POST, self.url(None), Some(body)).await?;

        if response.status != status::CREATED {
            return Ok(self.failed("create", response));
        }

        let id = extract_id(&response)?;
        debug!("Created {} {}", self.label, id);
        Ok(RecordOutcome::Success(id))
    }

    /// Read one record, or the record type's collection when `id` is `None`.
    /// Success carries the raw JSON body.
    pub async fn read(&self, id: Option<&str>) -> anyhow::Result<RecordOutcome<String>> {
        let response = self.client.execute(Method::GET, self.url(id), None).await?;

        if response.status != status::OK {
            return Ok(self.failed("read", response));
        }

        Ok(RecordOutcome::Success(response.body))
    }

    /// Read one record and return the response whatever its status
    pub async fn find_by_id(&self, id: &str) -> anyhow::Result<HttpResponse> {
        self.client.execute(Method::GET, self.url(Some(id)), None).await
    }

    /// Update fields of an existing record; success carries the status code
    pub async fn update<R: Serialize + ?Sized>(&self, id: &str, record: &R) -> anyhow::Result<RecordOutcome<u16>> {
        let body = serialize_record(record)?;
        let response = self.client.execute(Method::PATCH, self.url(Some(id)), Some(body)).await?;

        if response.status != status::NO_CONTENT {
            return Ok(self.failed("update", response));
        }

        Ok(RecordOutcome::Success(response.status))
    }

    /// Delete a record; success carries the status code
    pub async fn delete(&self, id: &str) -> anyhow::Result<RecordOutcome<u16>> {
        let response = self.client.execute(Method::DELETE, self.url(Some(id)), None).await?;

        if response.status != status::NO_CONTENT {
            return Ok(self.failed("delete", response));
        }

        Ok(RecordOutcome::Success(response.status))
    }

    fn failed<T>(&self, operation: &str, response: HttpResponse) -> RecordOutcome<T> {
        warn!("{} on {} failed with status {}", operation, self.label, response.status);
        RecordOutcome::Failed {
            status: response.status,
            body: response.body,
        }
    }
}

fn serialize_record<R: Serialize + ?Sized>(record: &R) -> anyhow::Result<String> {
    serde_json::to_string(record).context("Failed to serialize record")
}

fn extract_id(response: &HttpResponse) -> anyhow::Result<String> {
    let malformed = |reason: String| ApiError::MalformedResponse {
        status: response.status,
        reason,
    };

    let json: Value = serde_json::from_str(&response.body)
        .map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

    let id = json
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing 'id' field".to_string()))?;

    Ok(id.to_string())
}
