//! Credential-to-token exchange against the ICANN account API.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::Session;
use crate::{Error, Result};

/// Exchanges a session's credentials for a bearer token.
///
/// # Example
///
/// ```no_run
/// use czds_rs::{Authenticator, Session};
///
/// # async fn example() -> czds_rs::Result<()> {
/// let session = Session::new("user@example.com", "password");
/// let authenticator = Authenticator::new(reqwest::Client::new());
/// authenticator.refresh(&session).await?;
/// assert!(session.is_authenticated().await);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticator {
    http: reqwest::Client,
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    access_token: String,
}

impl Authenticator {
    /// Create an authenticator sending requests through `http`.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Authenticate and store the new token in `session`.
    ///
    /// The previous token is kept when authentication fails.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedRequest`] on 400
    /// - [`Error::IncorrectCredentials`] on 401
    /// - [`Error::TooManyAuthentications`] on 429
    /// - [`Error::UpstreamInternalError`] on 500
    /// - [`Error::UnexpectedStatus`] on any other non-success status
    /// - [`Error::Json`] if a success body carries no usable `accessToken`
    /// - [`Error::Http`] on transport failure
    #[instrument(skip(self, session))]
    pub async fn refresh(&self, session: &Session) -> Result<()> {
        let url = session.auth_url().await;
        let credentials = session.credentials().await;
        debug!(url = %url, username = credentials.username(), "authenticating");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&AuthRequest {
                username: credentials.username(),
                password: credentials.password(),
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::BAD_REQUEST => return Err(Error::MalformedRequest { url }),
            StatusCode::UNAUTHORIZED => return Err(Error::IncorrectCredentials),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("authentication rate limited");
                return Err(Error::TooManyAuthentications);
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                return Err(Error::UpstreamInternalError { url })
            }
            status if status.is_success() => {}
            status => return Err(Error::unexpected_status(status, &url)),
        }

        let body = response.bytes().await?;
        let token = parse_access_token(&body)?;
        session.set_access_token(token).await;

        info!("access token refreshed");
        Ok(())
    }
}

fn parse_access_token(body: &[u8]) -> Result<String> {
    let response: AuthResponse = serde_json::from_slice(body)?;
    if response.access_token.is_empty() {
        return Err(Error::Json(serde::de::Error::custom(
            "empty accessToken in authentication response",
        )));
    }
    Ok(response.access_token)
}
