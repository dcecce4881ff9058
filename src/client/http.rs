//! HTTP client implementation for the CZDS API.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::api::ZonesService;
use crate::auth::{Authenticator, Session};
use crate::download::DownloadCoordinator;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the CZDS API.
///
/// # Example
///
/// ```no_run
/// use czds_rs::CzdsClient;
///
/// # async fn example() -> czds_rs::Result<()> {
/// let client = CzdsClient::login("user@example.com", "password").await?;
///
/// let links = client.zones().list().await?;
/// println!("Entitled to {} zones", links.len());
/// # Ok(())
/// # }
/// ```
pub struct CzdsClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
    pub(crate) coordinator: DownloadCoordinator,
    authenticator: Authenticator,
}

impl CzdsClient {
    /// Create an unauthenticated client for the production endpoints.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_session(Session::new(username, password), ClientConfig::default())
    }

    /// Create a client and authenticate once.
    pub async fn login(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let client = Self::new(username, password)?;
        client.refresh_session().await?;
        Ok(client)
    }

    /// Create a client with an existing session and custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `config.concurrency` is zero and
    /// [`Error::Http`] if the HTTP client cannot be built.
    pub fn with_session(session: Session, config: ClientConfig) -> Result<Self> {
        let http = config.build_http()?;
        let coordinator = DownloadCoordinator::new(config.concurrency)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                authenticator: Authenticator::new(http.clone()),
                http,
                session,
                config,
                coordinator,
            }),
        })
    }

    /// Get the zones service.
    pub fn zones(&self) -> ZonesService {
        ZonesService::new(self.inner.clone())
    }

    /// Authenticate again and replace the session token.
    ///
    /// Batches already running keep the token they started with.
    pub async fn refresh_session(&self) -> Result<()> {
        self.inner.authenticator.refresh(&self.inner.session).await
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// `GET {base}{path}` with the bearer token, returning the raw response.
    pub(crate) async fn get(&self, path: &str) -> Result<(String, reqwest::Response)> {
        let token = self.session.access_token().await.ok_or(Error::MustRefresh)?;
        let url = format!("{}{}", self.session.base_url().await, path);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Ok((url, response))
    }
}

impl Clone for CzdsClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for CzdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CzdsClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_zero_concurrency_in_config_rejected() {
        let config = ClientConfig {
            concurrency: 0,
            ..ClientConfig::default()
        };
        let err = CzdsClient::with_session(Session::new("user", "pass"), config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_configured_concurrency_reaches_batches() {
        let config = ClientConfig::default().with_concurrency(7).unwrap();
        let client = CzdsClient::with_session(Session::new("user", "pass"), config).unwrap();
        assert_eq!(client.inner.coordinator.concurrency(), 7);
    }
}
