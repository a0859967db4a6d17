//! Minimal SOAP 1.1 binding for the Metadata API
//!
//! Structured arguments and headers are `serde_json::Value` trees: object keys
//! become child elements in insertion order, arrays become repeated elements,
//! and nulls are omitted. Replies are decoded the other way round, with
//! repeated elements collected into arrays and `xsi:nil` decoded as null.

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use reqwest::Method;
use roxmltree::{Document, Node};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::api::constants::{headers, namespaces};
use crate::api::error::ApiError;
use crate::api::transport::{HttpRequest, Transport};

use super::wsdl::Wsdl;

const ENVELOPE_PREFIX: &str = "soapenv";
const SERVICE_PREFIX: &str = "met";

/// Capability to invoke one operation of a bound SOAP service
#[async_trait]
pub trait SoapBinding: Send + Sync {
    async fn call(&self, operation: &str, arguments: &Value, soap_headers: &Value) -> anyhow::Result<Value>;
}

/// Binding that posts SOAP envelopes to a fixed endpoint through a [`Transport`]
#[derive(Clone)]
pub struct HttpSoapBinding {
    transport: Arc<dyn Transport>,
    endpoint: String,
    namespace: String,
}

impl HttpSoapBinding {
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            namespace: namespace.into(),
        }
    }

    /// Bind using the WSDL's target namespace, posting to `endpoint`
    pub fn from_wsdl(transport: Arc<dyn Transport>, wsdl: &Wsdl, endpoint: impl Into<String>) -> Self {
        Self::new(transport, endpoint, wsdl.target_namespace.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[async_trait]
impl SoapBinding for HttpSoapBinding {
    async fn call(&self, operation: &str, arguments: &Value, soap_headers: &Value) -> anyhow::Result<Value> {
        let envelope = build_envelope(&self.namespace, operation, arguments, soap_headers)?;

        let request = HttpRequest::new(Method::POST, self.endpoint.clone())
            .header(headers::CONTENT_TYPE, headers::CONTENT_TYPE_XML)
            .header(headers::SOAP_ACTION, "\"\"")
            .body(envelope);

        debug!("SOAP {} -> {}", operation, self.endpoint);
        let response = self.transport.send(request).await?;

        if let Some(fault) = parse_fault(&response.body) {
            warn!("SOAP {} returned a fault: {}", operation, fault);
            return Err(fault.into());
        }
        if !response.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        parse_response(&response.body)
    }
}

/// Serialize a full SOAP 1.1 envelope for one operation call
pub fn build_envelope(namespace: &str, operation: &str, arguments: &Value, soap_headers: &Value) -> anyhow::Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let envelope_tag = format!("{}:Envelope", ENVELOPE_PREFIX);
    let mut envelope = BytesStart::new(envelope_tag.as_str());
    envelope.push_attribute((format!("xmlns:{}", ENVELOPE_PREFIX).as_str(), namespaces::SOAP_ENVELOPE));
    envelope.push_attribute((format!("xmlns:{}", SERVICE_PREFIX).as_str(), namespace));
    writer.write_event(Event::Start(envelope))?;

    let header_tag = format!("{}:Header", ENVELOPE_PREFIX);
    writer.write_event(Event::Start(BytesStart::new(header_tag.as_str())))?;
    if let Value::Object(entries) = soap_headers {
        for (name, value) in entries {
            write_value(&mut writer, name, value)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(header_tag.as_str())))?;

    let body_tag = format!("{}:Body", ENVELOPE_PREFIX);
    writer.write_event(Event::Start(BytesStart::new(body_tag.as_str())))?;
    match arguments {
        Value::Null => write_empty(&mut writer, operation)?,
        other => write_value(&mut writer, operation, other)?,
    }
    writer.write_event(Event::End(BytesEnd::new(body_tag.as_str())))?;

    writer.write_event(Event::End(BytesEnd::new(envelope_tag.as_str())))?;

    String::from_utf8(writer.into_inner()).context("SOAP envelope is not valid UTF-8")
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> anyhow::Result<()> {
    let tag = format!("{}:{}", SERVICE_PREFIX, name);
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                write_value(writer, name, item)?;
            }
        }
        Value::Object(entries) => {
            writer.write_event(Event::Start(BytesStart::new(tag.as_str())))?;
            for (child, child_value) in entries {
                write_value(writer, child, child_value)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        }
        Value::String(text) => write_text(writer, &tag, text)?,
        Value::Bool(flag) => write_text(writer, &tag, &flag.to_string())?,
        Value::Number(number) => write_text(writer, &tag, &number.to_string())?,
    }
    Ok(())
}

fn write_text(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_empty(writer: &mut Writer<Vec<u8>>, name: &str) -> anyhow::Result<()> {
    let tag = format!("{}:{}", SERVICE_PREFIX, name);
    writer.write_event(Event::Empty(BytesStart::new(tag.as_str())))?;
    Ok(())
}

/// Decode the first element inside the SOAP body
pub fn parse_response(xml: &str) -> anyhow::Result<Value> {
    let doc = Document::parse(xml).map_err(|e| ApiError::MalformedResponse {
        status: 200,
        reason: format!("invalid SOAP XML: {}", e),
    })?;

    let body = find_body(&doc).ok_or_else(|| ApiError::MalformedResponse {
        status: 200,
        reason: "SOAP envelope has no Body".to_string(),
    })?;

    Ok(body
        .children()
        .find(|node| node.is_element())
        .map(element_to_value)
        .unwrap_or(Value::Null))
}

/// Extract a SOAP fault, if the document carries one
pub fn parse_fault(xml: &str) -> Option<ApiError> {
    let doc = Document::parse(xml).ok()?;
    let fault = find_body(&doc)?
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == "Fault")?;

    let child_text = |name: &str| {
        fault
            .children()
            .find(|node| node.is_element() && node.tag_name().name() == name)
            .and_then(|node| node.text())
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    Some(ApiError::SoapFault {
        code: child_text("faultcode"),
        message: child_text("faultstring"),
    })
}

fn find_body<'a, 'input>(doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    doc.descendants()
        .find(|node| node.has_tag_name((namespaces::SOAP_ENVELOPE, "Body")))
}

fn element_to_value(node: Node) -> Value {
    if node.attribute((namespaces::XML_SCHEMA_INSTANCE, "nil")) == Some("true") {
        return Value::Null;
    }

    let mut children = node.children().filter(|child| child.is_element()).peekable();
    if children.peek().is_none() {
        return Value::String(node.text().unwrap_or_default().trim().to_string());
    }

    let mut map = Map::new();
    for child in children {
        let key = child.tag_name().name().to_string();
        let value = element_to_value(child);
        match map.get_mut(&key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key, value);
            }
        }
    }
    Value::Object(map)
}
