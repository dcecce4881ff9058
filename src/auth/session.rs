//! Session state for CZDS API authentication.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use crate::models::{DEFAULT_AUTH_URL, DEFAULT_BASE_URL};
use crate::{Error, Result};

/// ICANN account credentials.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authentication session for the CZDS API.
///
/// Holds the credentials, the two endpoint URLs and the current access
/// token. A new session has no token; [`Authenticator::refresh`] fills it
/// in and every later refresh overwrites it.
///
/// # Thread Safety
///
/// `Session` is cheap to clone and all clones share the same state. Batch
/// downloads copy the token once at launch, so refreshing while a batch
/// is running never changes the token its workers send.
///
/// [`Authenticator::refresh`]: crate::auth::Authenticator::refresh
#[derive(Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
}

struct SessionInner {
    credentials: Credentials,
    auth_url: String,
    base_url: String,
    access_token: Option<SecretString>,
    authenticated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create an unauthenticated session against the production endpoints.
    ///
    /// # Example
    ///
    /// ```
    /// use czds_rs::Session;
    ///
    /// # async fn example() {
    /// let session = Session::new("user@example.com", "hunter2");
    /// assert!(!session.is_authenticated().await);
    /// # }
    /// ```
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::from_credentials(Credentials::new(username, password))
    }

    /// Create an unauthenticated session from existing credentials.
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                credentials,
                auth_url: DEFAULT_AUTH_URL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                access_token: None,
                authenticated_at: None,
            })),
        }
    }

    /// Override the authentication endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if `url` does not parse, and
    /// [`Error::InvalidInput`] if it cannot carry a path or another clone of
    /// the session holds its lock.
    pub fn with_auth_url(self, url: &str) -> Result<Self> {
        let url = normalize_url(url)?;
        self.write_blocking(|inner| inner.auth_url = url)?;
        Ok(self)
    }

    /// Override the CZDS API base URL (scheme, host and optional path
    /// prefix; `/czds/...` paths are appended to it).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if `url` does not parse, and
    /// [`Error::InvalidInput`] if it cannot carry a path or another clone of
    /// the session holds its lock.
    pub fn with_base_url(self, url: &str) -> Result<Self> {
        let url = normalize_url(url)?;
        self.write_blocking(|inner| inner.base_url = url)?;
        Ok(self)
    }

    /// Returns `true` if the session currently holds an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.access_token.is_some()
    }

    /// When the current token was obtained, if any.
    pub async fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.authenticated_at
    }

    /// The account username.
    pub async fn username(&self) -> String {
        self.inner.read().await.credentials.username().to_string()
    }

    /// The authentication endpoint.
    pub async fn auth_url(&self) -> String {
        self.inner.read().await.auth_url.clone()
    }

    /// The CZDS API base URL.
    pub async fn base_url(&self) -> String {
        self.inner.read().await.base_url.clone()
    }

    /// Install a token obtained elsewhere.
    ///
    /// An empty token clears the session instead.
    pub async fn set_access_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut inner = self.inner.write().await;
        if token.is_empty() {
            inner.access_token = None;
            inner.authenticated_at = None;
        } else {
            inner.access_token = Some(SecretString::from(token));
            inner.authenticated_at = Some(Utc::now());
        }
    }

    /// Forget the current token.
    pub async fn clear_access_token(&self) {
        let mut inner = self.inner.write().await;
        inner.access_token = None;
        inner.authenticated_at = None;
    }

    /// Snapshot of the current token.
    pub(crate) async fn access_token(&self) -> Option<SecretString> {
        self.inner.read().await.access_token.clone()
    }

    pub(crate) async fn credentials(&self) -> Credentials {
        self.inner.read().await.credentials.clone()
    }

    /// Builder-time mutation. Fails instead of waiting if a clone holds the lock.
    fn write_blocking(&self, f: impl FnOnce(&mut SessionInner)) -> Result<()> {
        let mut inner = self.inner.try_write().map_err(|_| {
            Error::InvalidInput("Session is in use; endpoint cannot be overridden".to_string())
        })?;
        f(&mut inner);
        Ok(())
    }
}

fn normalize_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidInput(format!("Not a base URL: {}", url)));
    }
    Ok(url.trim_end_matches('/').to_string())
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &"...")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
