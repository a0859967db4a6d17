//! Salesforce REST and Metadata API access
//!
//! Requests are built from an authenticated [`SessionContext`] and sent through
//! a [`Transport`]. Record operations come back as [`RecordOutcome`] values;
//! metadata listing goes through a [`SoapBinding`].

pub mod client;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod manager;
pub mod metadata;
pub mod outcome;
pub mod session;
pub mod sobject;
pub mod transport;

pub use client::RestClient;
pub use error::ApiError;
pub use manager::Sfdc;
pub use metadata::{FileProperties, HttpSoapBinding, ListMetadataQuery, MetadataClient, SoapBinding, Wsdl};
pub use outcome::RecordOutcome;
pub use session::SessionContext;
pub use sobject::RecordAccessor;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
