//! Metadata listing through the SOAP binding

mod common;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use common::ScriptedTransport;
use sfdc_cli::api::constants::namespaces;
use sfdc_cli::api::{ApiError, HttpResponse, HttpSoapBinding, ListMetadataQuery, MetadataClient, SoapBinding};

/// Records calls and answers with a fixed value
struct RecordingBinding {
    reply: Value,
    calls: Mutex<Vec<(String, Value, Value)>>,
}

impl RecordingBinding {
    fn new(reply: Value) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SoapBinding for RecordingBinding {
    async fn call(&self, operation: &str, arguments: &Value, soap_headers: &Value) -> anyhow::Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), arguments.clone(), soap_headers.clone()));
        Ok(self.reply.clone())
    }
}

fn soap_reply(results: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
                  xmlns="http://soap.sforce.com/2006/04/metadata"
                  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soapenv:Body><listMetadataResponse>{}</listMetadataResponse></soapenv:Body>
</soapenv:Envelope>"#,
        results
    )
}

const WORKFLOW_RULE: &str = r#"<result>
  <createdById>005xx000001</createdById>
  <createdByName>Admin User</createdByName>
  <createdDate>2023-04-01T10:15:00.000Z</createdDate>
  <fileName>workflows/Account.workflow</fileName>
  <fullName>Account.Notify_Owner</fullName>
  <id>04Yxx0000000001</id>
  <lastModifiedById>005xx000001</lastModifiedById>
  <lastModifiedByName>Admin User</lastModifiedByName>
  <lastModifiedDate>2023-04-02T08:00:00.000Z</lastModifiedDate>
  <manageableState>unmanaged</manageableState>
  <type>WorkflowRule</type>
</result>"#;

#[tokio::test]
async fn test_list_metadata_passes_queries_version_and_session_header() -> Result<()> {
    let binding = Arc::new(RecordingBinding::new(json!({})));
    let client = MetadataClient::new(binding.clone(), "session-token", "59.0");

    let queries = vec![
        ListMetadataQuery::new("WorkflowRule"),
        ListMetadataQuery::new("Report").in_folder("Sales"),
    ];
    let components = client.list_metadata(&queries).await?;
    assert!(components.is_empty());

    let calls = binding.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (operation, arguments, headers) = &calls[0];
    assert_eq!(operation, "listMetadata");
    assert_eq!(
        arguments,
        &json!({
            "queries": [{"type": "WorkflowRule"}, {"folder": "Sales", "type": "Report"}],
            "asOfVersion": "59.0"
        })
    );
    assert_eq!(headers, &json!({"SessionHeader": {"sessionId": "session-token"}}));
    Ok(())
}

#[tokio::test]
async fn test_single_result_is_still_a_sequence() -> Result<()> {
    let binding = Arc::new(RecordingBinding::new(json!({
        "result": {"fullName": "Account.Notify_Owner", "type": "WorkflowRule"}
    })));
    let client = MetadataClient::new(binding, "tok", "59.0");

    let components = client.list_metadata(&[ListMetadataQuery::new("WorkflowRule")]).await?;
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].full_name, "Account.Notify_Owner");
    Ok(())
}

#[tokio::test]
async fn test_list_metadata_over_http_binding() -> Result<()> {
    let transport = Arc::new(ScriptedTransport::new(vec![HttpResponse::new(
        200,
        soap_reply(&format!("{}{}", WORKFLOW_RULE, WORKFLOW_RULE.replace("Notify_Owner", "Escalate"))),
    )]));
    let endpoint = common::session().metadata_server_url();
    let binding = Arc::new(HttpSoapBinding::new(transport.clone(), endpoint, namespaces::METADATA));
    let client = MetadataClient::new(binding, common::TOKEN, common::API_VERSION);

    let components = client.list_metadata(&[ListMetadataQuery::new("WorkflowRule")]).await?;
    let names: Vec<&str> = components.iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["Account.Notify_Owner", "Account.Escalate"]);
    assert_eq!(components[0].manageable_state.as_deref(), Some("unmanaged"));
    assert_eq!(components[0].namespace_prefix, None);

    let request = transport.last_request();
    assert_eq!(request.url, "https://example.my.salesforce.com/services/Soap/m/59.0");
    assert_eq!(request.header_value("Content-Type"), Some("text/xml; charset=UTF-8"));
    assert_eq!(request.header_value("SOAPAction"), Some("\"\""));
    let body = request.body.expect("envelope body");
    assert!(body.contains("<met:sessionId>00Dxx0000000001!token</met:sessionId>"));
    assert!(body.contains("<met:queries><met:type>WorkflowRule</met:type></met:queries>"));
    assert!(body.contains("<met:asOfVersion>59.0</met:asOfVersion>"));
    Ok(())
}

#[tokio::test]
async fn test_empty_listing_over_http_binding() -> Result<()> {
    let transport = Arc::new(ScriptedTransport::new(vec![HttpResponse::new(200, soap_reply(""))]));
    let binding = Arc::new(HttpSoapBinding::new(
        transport,
        "https://example.my.salesforce.com/services/Soap/m/59.0",
        namespaces::METADATA,
    ));
    let client = MetadataClient::new(binding, "tok", "59.0");

    let components = client.list_metadata(&[ListMetadataQuery::new("WorkflowRule")]).await?;
    assert!(components.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_soap_fault_propagates() {
    let fault = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>sf:INVALID_TYPE</faultcode>
      <faultstring>INVALID_TYPE: Unknown type name 'Nope'</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;
    let transport = Arc::new(ScriptedTransport::new(vec![HttpResponse::new(500, fault)]));
    let binding = Arc::new(HttpSoapBinding::new(transport, "https://x/services/Soap/m/59.0", namespaces::METADATA));
    let client = MetadataClient::new(binding, "tok", "59.0");

    let err = client.list_metadata(&[ListMetadataQuery::new("Nope")]).await.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::SoapFault { code, message }) => {
            assert_eq!(code, "sf:INVALID_TYPE");
            assert!(message.contains("Unknown type name"));
        }
        other => panic!("expected SOAP fault, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_fault_error_status() {
    let transport = Arc::new(ScriptedTransport::new(vec![HttpResponse::new(503, "Service Unavailable")]));
    let binding = Arc::new(HttpSoapBinding::new(transport, "https://x/services/Soap/m/59.0", namespaces::METADATA));
    let client = MetadataClient::new(binding, "tok", "59.0");

    let err = client.list_metadata(&[ListMetadataQuery::new("WorkflowRule")]).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ApiError>(),
        Some(&ApiError::UnexpectedStatus {
            status: 503,
            body: "Service Unavailable".to_string()
        })
    );
}
