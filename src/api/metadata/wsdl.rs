use anyhow::Context;
use roxmltree::Document;
use std::fs;
use std::path::Path;

use crate::api::constants::namespaces;

/// The parts of a WSDL document the binding needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wsdl {
    pub target_namespace: String,
    /// First `soap:address` location, if the document declares one
    pub location: Option<String>,
}

impl Wsdl {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read WSDL file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse WSDL file: {:?}", path))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let doc = Document::parse(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse WSDL XML: {}", e))?;

        let root = doc.root_element();
        if !root.has_tag_name((namespaces::WSDL, "definitions")) {
            anyhow::bail!("Root element is not wsdl:definitions");
        }

        let target_namespace = root
            .attribute("targetNamespace")
            .ok_or_else(|| anyhow::anyhow!("WSDL definitions has no targetNamespace"))?
            .to_string();

        let location = doc
            .descendants()
            .find(|node| node.has_tag_name((namespaces::WSDL_SOAP, "address")))
            .and_then(|node| node.attribute("location"))
            .map(str::to_string);

        Ok(Self {
            target_namespace,
            location,
        })
    }

    /// The declared service address, when it points somewhere other than `endpoint`
    pub fn foreign_location(&self, endpoint: &str) -> Option<&str> {
        self.location
            .as_deref()
            .filter(|location| location.trim_end_matches('/') != endpoint.trim_end_matches('/'))
    }
}
