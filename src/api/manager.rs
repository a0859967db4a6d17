use log::{debug, info};
use std::sync::Arc;

use super::client::RestClient;
use super::constants::namespaces;
use super::metadata::{HttpSoapBinding, MetadataClient, Wsdl};
use super::session::SessionContext;
use super::transport::{ReqwestTransport, Transport};
use crate::auth::{Authenticator, Credentials};
use crate::config::Config;

/// One authenticated session exposed as a REST client and a metadata client
#[derive(Clone)]
pub struct Sfdc {
    session: Arc<SessionContext>,
    transport: Arc<dyn Transport>,
    wsdl: Option<Wsdl>,
}

impl Sfdc {
    /// Log in once with the default transport
    pub async fn connect(credentials: &Credentials, config: &Config) -> anyhow::Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.transport)?);
        Self::connect_with(credentials, config, transport).await
    }

    /// Log in once through the given transport
    pub async fn connect_with(
        credentials: &Credentials,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> anyhow::Result<Self> {
        let wsdl = config.metadata_wsdl.as_ref().map(Wsdl::from_file).transpose()?;

        let session = Authenticator::new(transport.clone(), config.domain.clone())
            .login(credentials, &config.api_version)
            .await?;

        Ok(Self {
            session: Arc::new(session),
            transport,
            wsdl,
        })
    }

    /// Wrap an existing session without logging in
    pub fn from_session(session: SessionContext, transport: Arc<dyn Transport>) -> Self {
        Self {
            session: Arc::new(session),
            transport,
            wsdl: None,
        }
    }

    /// Use this WSDL's target namespace for metadata calls
    pub fn with_wsdl(mut self, wsdl: Wsdl) -> Self {
        self.wsdl = Some(wsdl);
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// REST client for record CRUD
    pub fn rest(&self) -> RestClient {
        RestClient::new(self.session.clone(), self.transport.clone())
    }

    /// Metadata client bound to the instance's metadata SOAP endpoint
    pub fn metadata(&self) -> MetadataClient {
        let endpoint = self.session.metadata_server_url();
        let binding = match &self.wsdl {
            Some(wsdl) => {
                if let Some(location) = wsdl.foreign_location(&endpoint) {
                    debug!("Ignoring WSDL service address {}, using instance endpoint", location);
                }
                HttpSoapBinding::from_wsdl(self.transport.clone(), wsdl, endpoint)
            }
            None => HttpSoapBinding::new(self.transport.clone(), endpoint, namespaces::METADATA),
        };
        info!("Metadata binding at {} ({})", binding.endpoint(), binding.namespace());

        MetadataClient::new(Arc::new(binding), self.session.token(), self.session.api_version())
    }
}
