//! Metadata API access over SOAP

pub mod models;
pub mod soap;
pub mod wsdl;

pub use models::{FileProperties, ListMetadataQuery};
pub use soap::{HttpSoapBinding, SoapBinding};
pub use wsdl::Wsdl;

use log::debug;
use serde_json::{Value, json};
use std::sync::Arc;

use super::error::ApiError;

const LIST_METADATA: &str = "listMetadata";

/// Metadata accessor bound to one SOAP service and session
#[derive(Clone)]
pub struct MetadataClient {
    binding: Arc<dyn SoapBinding>,
    session_header: Value,
    api_version: String,
}

impl MetadataClient {
    pub fn new(binding: Arc<dyn SoapBinding>, token: &str, api_version: impl Into<String>) -> Self {
        Self {
            binding,
            session_header: json!({ "SessionHeader": { "sessionId": token } }),
            api_version: api_version.into(),
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// List the components matching `queries`, as of this client's API version
    pub async fn list_metadata(&self, queries: &[ListMetadataQuery]) -> anyhow::Result<Vec<FileProperties>> {
        let arguments = json!({
            "queries": queries,
            "asOfVersion": self.api_version,
        });

        let response = self.binding.call(LIST_METADATA, &arguments, &self.session_header).await?;

        let results = match response.get("result") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(single) => vec![single.clone()],
        };
        debug!("listMetadata returned {} components", results.len());

        results
            .into_iter()
            .map(|item| {
                serde_json::from_value::<FileProperties>(item).map_err(|e| {
                    anyhow::Error::from(ApiError::MalformedResponse {
                        status: 200,
                        reason: format!("unexpected listMetadata result: {}", e),
                    })
                })
            })
            .collect()
    }
}
