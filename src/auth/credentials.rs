use anyhow::Result;
use log::info;
use std::fmt;
use std::path::Path;

pub const ENV_USERNAME: &str = "SFDC_USERNAME";
pub const ENV_PASSWORD: &str = "SFDC_PASSWORD";
pub const ENV_SECURITY_TOKEN: &str = "SFDC_SECURITY_TOKEN";
pub const ENV_CLIENT_ID: &str = "SFDC_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SFDC_CLIENT_SECRET";

/// Username-password login credentials for a connected app
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub security_token: Option<String>,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Credentials> {
        Self::load_env(None)
    }

    /// Like [`Credentials::from_env`], but `SFDC_PASSWORD` is neither read nor required
    pub fn from_env_with_password(password: impl Into<String>) -> Result<Credentials> {
        Self::load_env(Some(password.into()))
    }

    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Credentials> {
        Self::load_env_file(path.as_ref(), None)
    }

    /// Like [`Credentials::from_env_file`], but `SFDC_PASSWORD` is neither read nor required
    pub fn from_env_file_with_password(path: impl AsRef<Path>, password: impl Into<String>) -> Result<Credentials> {
        Self::load_env_file(path.as_ref(), Some(password.into()))
    }

    fn load_env(password: Option<String>) -> Result<Credentials> {
        info!("Importing credentials from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok(), "environment", password)
    }

    fn load_env_file(path: &Path, password: Option<String>) -> Result<Credentials> {
        info!("Importing credentials from .env file: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Environment file not found: {:?}", path);
        }

        let entries: Vec<(String, String)> = dotenvy::from_path_iter(path)
            .map_err(|e| anyhow::anyhow!("Failed to load .env file {:?}: {}", path, e))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to parse .env file {:?}: {}", path, e))?;

        let source = format!(".env file {:?}", path);
        Self::from_lookup(
            |key| {
                entries
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| value.clone())
            },
            &source,
            password,
        )
    }

    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: Option<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
            security_token,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Password as sent to the token endpoint: password followed by the security token
    pub fn login_password(&self) -> String {
        match &self.security_token {
            Some(token) => format!("{}{}", self.password, token),
            None => self.password.clone(),
        }
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        source: &str,
        password: Option<String>,
    ) -> Result<Credentials> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} not set in {}", key, source))
        };

        Ok(Credentials {
            username: required(ENV_USERNAME)?,
            password: match password {
                Some(password) => password,
                None => required(ENV_PASSWORD)?,
            },
            security_token: lookup(ENV_SECURITY_TOKEN).filter(|value| !value.is_empty()),
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security_token", &self.security_token.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
