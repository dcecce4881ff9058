//! Authenticated zone file download.

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use super::stream::{ZoneFile, ZoneStream};
use crate::auth::Session;
use crate::models::ZoneId;
use crate::{Error, Result};

/// Outcome of fetching one zone.
pub type ZoneResult = std::result::Result<ZoneFile, ZoneFailure>;

/// A failed zone fetch, tagged with its zone.
#[derive(Debug, thiserror::Error)]
#[error("zone {zone}: {error}")]
pub struct ZoneFailure {
    /// The zone that failed
    pub zone: ZoneId,
    /// What went wrong
    #[source]
    pub error: Error,
}

impl ZoneFailure {
    pub(crate) fn new(zone: ZoneId, error: Error) -> Self {
        Self { zone, error }
    }
}

impl From<ZoneFailure> for Error {
    fn from(failure: ZoneFailure) -> Self {
        failure.error
    }
}

/// Downloads zone files with a fixed token.
///
/// The token is copied out of the [`Session`] when the fetcher is created,
/// so a fetcher keeps working with the same token even if the session is
/// refreshed meanwhile. Cloning is cheap.
#[derive(Clone)]
pub struct ZoneFetcher {
    http: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ZoneFetcher {
    /// Snapshot the session's base URL and token.
    pub async fn from_session(http: reqwest::Client, session: &Session) -> Self {
        Self {
            http,
            base_url: session.base_url().await,
            token: session.access_token().await,
        }
    }

    /// The download URL of `zone`. The identifier is percent-encoded as a
    /// single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] or [`Error::InvalidInput`] if the base URL
    /// cannot carry a path.
    pub fn zone_url(&self, zone: &ZoneId) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidInput(format!("Not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["czds", "downloads", &format!("{}.zone", zone)]);
        Ok(url.into())
    }

    /// Download `zone` and open its decompressed body.
    ///
    /// Every failure comes back as a [`ZoneFailure`] tagged with the zone.
    ///
    /// Failures:
    /// - [`Error::MustRefresh`] without any request if there is no token,
    ///   or on 401
    /// - [`Error::MalformedRequest`] on 400
    /// - [`Error::ZoneUnavailable`] on 403
    /// - [`Error::ZoneNotExist`] on 404
    /// - [`Error::TermsNotAccepted`] on 409
    /// - [`Error::UnexpectedStatus`] on any other non-success status
    /// - [`Error::Gzip`] if the body is not gzip
    /// - [`Error::Http`] on transport failure
    #[instrument(skip_all, fields(zone = %zone))]
    pub async fn fetch(&self, zone: &ZoneId) -> ZoneResult {
        self.open(zone)
            .await
            .map(ZoneFile::new)
            .map_err(|e| ZoneFailure::new(zone.clone(), e))
    }

    async fn open(&self, zone: &ZoneId) -> Result<ZoneStream> {
        let Some(token) = &self.token else {
            return Err(Error::MustRefresh);
        };

        let url = self.zone_url(zone)?;
        debug!(url = %url, "requesting zone");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
            .send()
            .await?;

        let zone = zone.clone();
        match response.status() {
            StatusCode::BAD_REQUEST => return Err(Error::MalformedRequest { url }),
            StatusCode::UNAUTHORIZED => return Err(Error::MustRefresh),
            StatusCode::FORBIDDEN => return Err(Error::ZoneUnavailable { zone }),
            StatusCode::NOT_FOUND => return Err(Error::ZoneNotExist { zone }),
            StatusCode::CONFLICT => return Err(Error::TermsNotAccepted { zone }),
            status if status.is_success() => {}
            status => return Err(Error::unexpected_status(status, &url)),
        }

        ZoneStream::new(zone, response.bytes_stream()).primed().await
    }
}

impl std::fmt::Debug for ZoneFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneFetcher")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
