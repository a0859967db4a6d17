use anyhow::Context;
use log::{debug, info};
use reqwest::Method;
use serde::Deserialize;
use std::sync::Arc;

use super::credentials::Credentials;
use crate::api::constants::{self, headers};
use crate::api::error::ApiError;
use crate::api::session::SessionContext;
use crate::api::transport::{HttpRequest, Transport};

/// Token endpoint reply; only the fields the session needs
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

/// Exchanges credentials for a session via the OAuth 2.0 username-password flow
pub struct Authenticator {
    transport: Arc<dyn Transport>,
    domain: String,
}

impl Authenticator {
    pub fn new(transport: Arc<dyn Transport>, domain: impl Into<String>) -> Self {
        Self {
            transport,
            domain: domain.into(),
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", constants::login_host(&self.domain), constants::OAUTH_TOKEN_PATH)
    }

    pub async fn login(&self, credentials: &Credentials, api_version: &str) -> anyhow::Result<SessionContext> {
        let token_url = self.token_url();
        info!("Authenticating {} against {}", credentials.username, token_url);

        let form = token_form(credentials)?;

        let request = HttpRequest::new(Method::POST, token_url)
            .header(headers::CONTENT_TYPE, headers::CONTENT_TYPE_FORM)
            .header(headers::ACCEPT, headers::ACCEPT_JSON)
            .body(form);

        let response = self.transport.send(request).await?;
        debug!("Token request status: {}", response.status);

        if !response.is_success() {
            return Err(ApiError::AuthenticationFailed {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let token: TokenResponse = serde_json::from_str(&response.body).map_err(|e| ApiError::MalformedResponse {
            status: response.status,
            reason: format!("unexpected token response: {}", e),
        })?;

        let session = SessionContext::new(token.access_token, &token.instance_url, api_version)
            .context("Token response carried an unusable instance URL")?;

        info!("Authenticated, instance {}", session.base_url());
        Ok(session)
    }
}

/// Password-grant form body for the token endpoint
fn token_form(credentials: &Credentials) -> anyhow::Result<String> {
    let password = credentials.login_password();
    serde_urlencoded::to_string([
        ("grant_type", "password"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("username", credentials.username.as_str()),
        ("password", password.as_str()),
    ])
    .context("Failed to encode token request")
}
