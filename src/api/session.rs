//! Post-authentication session state shared by every request

use anyhow::Context;
use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;

use super::constants::headers;
use super::endpoint;

/// Immutable session produced by login: bearer token, instance base URL,
/// API version and the headers attached to every REST call.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: String,
    base_url: String,
    api_version: String,
    default_headers: BTreeMap<String, String>,
}

impl SessionContext {
    /// Build a session from a token and an instance URL.
    ///
    /// Only the scheme and authority of `instance_url` are kept.
    pub fn new(
        token: impl Into<String>,
        instance_url: &str,
        api_version: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let token = token.into();
        let base_url = strip_path(instance_url)?;

        let mut default_headers = BTreeMap::new();
        default_headers.insert(headers::AUTHORIZATION.to_string(), format!("Bearer {}", token));
        default_headers.insert(headers::CONTENT_TYPE.to_string(), headers::CONTENT_TYPE_JSON.to_string());
        default_headers.insert(headers::ACCEPT.to_string(), headers::ACCEPT_JSON.to_string());

        Ok(Self {
            token,
            base_url,
            api_version: api_version.into(),
            default_headers,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Metadata API endpoint for this instance and version
    pub fn metadata_server_url(&self) -> String {
        endpoint::metadata_server_url(&self.base_url, &self.api_version)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn strip_path(instance_url: &str) -> anyhow::Result<String> {
    let url = Url::parse(instance_url)
        .with_context(|| format!("Invalid instance URL: {}", instance_url))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Instance URL has no host: {}", instance_url))?;

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_stripped() {
        let session = SessionContext::new(
            "tok",
            "https://example.my.salesforce.com/services/data/v59.0/",
            "59.0",
        )
        .unwrap();
        assert_eq!(session.base_url(), "https://example.my.salesforce.com");
    }

    #[test]
    fn test_port_is_kept() {
        let session = SessionContext::new("tok", "http://localhost:8080/x", "59.0").unwrap();
        assert_eq!(session.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_default_headers() {
        let session = SessionContext::new("abc", "https://example.my.salesforce.com", "59.0").unwrap();
        let headers = session.default_headers();
        assert_eq!(headers["Authorization"], "Bearer abc");
        assert_eq!(headers["Content-Type"], "application/json; charset=UTF-8");
        assert_eq!(headers["Accept"], "application/json");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_invalid_instance_url() {
        assert!(SessionContext::new("tok", "not a url", "59.0").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = SessionContext::new("secret-token", "https://example.my.salesforce.com", "59.0").unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_metadata_server_url() {
        let session = SessionContext::new("tok", "https://na1.salesforce.com/home", "58.0").unwrap();
        assert_eq!(session.metadata_server_url(), "https://na1.salesforce.com/services/Soap/m/58.0");
    }
}
