use log::debug;
use reqwest::Method;
use std::sync::Arc;

use super::endpoint;
use super::session::SessionContext;
use super::sobject::RecordAccessor;
use super::transport::{HttpRequest, HttpResponse, Transport};

/// REST client for one authenticated session
#[derive(Clone)]
pub struct RestClient {
    session: Arc<SessionContext>,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    pub fn new(session: Arc<SessionContext>, transport: Arc<dyn Transport>) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Accessor for one record type, e.g. `client.sobject("Account")`
    pub fn sobject(&self, label: impl Into<String>) -> RecordAccessor {
        RecordAccessor::new(self.clone(), label)
    }

    /// Send a request with explicit method, URL, headers and body.
    ///
    /// Bypasses label-based URL synthesis and the session's default headers.
    /// A relative `url` is joined onto the session's base URL.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> anyhow::Result<HttpResponse> {
        let url = if endpoint::is_absolute(url) {
            endpoint::normalize_separators(url)
        } else {
            endpoint::resolve_relative(self.session.base_url(), url)
        };

        let mut request = HttpRequest::new(method, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request.body = body;

        self.transport.send(request).await
    }

    /// Send a request carrying the session's default headers
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
    ) -> anyhow::Result<HttpResponse> {
        let mut request = HttpRequest::new(method, url);
        for (name, value) in self.session.default_headers() {
            request = request.header(name.clone(), value.clone());
        }
        request.body = body;

        debug!("{} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        debug!("Response status: {}", response.status);

        Ok(response)
    }
}
