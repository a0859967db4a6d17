//! API Constants and Configuration for the Salesforce REST and Metadata APIs

/// Default API version used when nothing else is configured
pub const DEFAULT_API_VERSION: &str = "59.0";

/// Versioned REST data root; a path containing this is already complete
pub const DATA_ROOT: &str = "/services/data/";

/// Record (sObject) collection segment under the versioned data root
pub const SOBJECTS_SEGMENT: &str = "sobjects";

/// Metadata API SOAP endpoint root
pub const METADATA_SOAP_ROOT: &str = "/services/Soap/m";

/// OAuth 2.0 token endpoint path on the login host
pub const OAUTH_TOKEN_PATH: &str = "/services/oauth2/token";

/// Full API path with version, e.g. `/services/data/v59.0`
pub fn api_path(api_version: &str) -> String {
    format!("{}v{}", DATA_ROOT, api_version)
}

/// Login host for a domain (`login` for production, `test` for sandboxes)
pub fn login_host(domain: &str) -> String {
    format!("https://{}.salesforce.com", domain)
}

/// Standard headers for REST and SOAP requests
pub mod headers {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ACCEPT: &str = "Accept";
    pub const SOAP_ACTION: &str = "SOAPAction";

    /// Content type for JSON request bodies
    pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

    /// Accept header for JSON responses
    pub const ACCEPT_JSON: &str = "application/json";

    /// Content type for SOAP 1.1 envelopes
    pub const CONTENT_TYPE_XML: &str = "text/xml; charset=UTF-8";

    /// Content type for the OAuth token request
    pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
}

/// Success status codes per record operation
pub mod status {
    pub const CREATED: u16 = 201;
    pub const OK: u16 = 200;
    pub const NO_CONTENT: u16 = 204;
}

/// XML namespaces used by the Metadata API binding
pub mod namespaces {
    pub const SOAP_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
    pub const XML_SCHEMA_INSTANCE: &str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const METADATA: &str = "http://soap.sforce.com/2006/04/metadata";
    pub const WSDL: &str = "http://schemas.xmlsoap.org/wsdl/";
    pub const WSDL_SOAP: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
}
