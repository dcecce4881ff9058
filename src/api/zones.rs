//! Zones service: entitlement listing and zone file downloads.

use std::path::Path;
use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::client::ClientInner;
use crate::download::{
    BatchReport, DownloadCoordinator, FileNameTemplate, ZoneFetcher, ZoneResult,
};
use crate::models::{ZoneId, ZoneList};
use crate::{Error, Result};

const LINKS_PATH: &str = "/czds/downloads/links";

/// Service for zone operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: czds_rs::CzdsClient) -> czds_rs::Result<()> {
/// // Which zones may this account download?
/// let links = client.zones().list().await?;
///
/// // Fetch one of them into memory
/// let zone = client.zones().fetch(&"xbox".into()).await?;
/// let text = zone.read_to_end().await?;
/// println!("{} bytes", text.len());
/// # Ok(())
/// # }
/// ```
pub struct ZonesService {
    inner: Arc<ClientInner>,
}

impl ZonesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the download links the current token is entitled to.
    ///
    /// # Errors
    ///
    /// - [`Error::MustRefresh`] without any request if there is no token,
    ///   or on 401
    /// - [`Error::MalformedRequest`] on 400
    /// - [`Error::UpstreamInternalError`] on 500
    /// - [`Error::UnexpectedStatus`] on any other non-success status
    /// - [`Error::Json`] if the body is not an array of strings
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<ZoneList> {
        let (url, response) = self.inner.get(LINKS_PATH).await?;

        match response.status() {
            StatusCode::BAD_REQUEST => return Err(Error::MalformedRequest { url }),
            StatusCode::UNAUTHORIZED => return Err(Error::MustRefresh),
            StatusCode::INTERNAL_SERVER_ERROR => {
                return Err(Error::UpstreamInternalError { url })
            }
            status if status.is_success() => {}
            status => return Err(Error::unexpected_status(status, &url)),
        }

        let list = ZoneList::from_slice(&response.bytes().await?)?;
        debug!(links = list.len(), "zone list received");
        Ok(list)
    }

    /// Download one zone and open its decompressed body.
    ///
    /// See [`ZoneFetcher::fetch`] for the failure cases.
    pub async fn fetch(&self, zone: &ZoneId) -> ZoneResult {
        self.fetcher().await.fetch(zone).await
    }

    /// A fetcher bound to the current token.
    pub async fn fetcher(&self) -> ZoneFetcher {
        ZoneFetcher::from_session(self.inner.http.clone(), &self.inner.session).await
    }

    /// Download `zones` into `dir` using the configured concurrency and
    /// file name template.
    ///
    /// Per-zone failures are logged and reported; they do not stop the batch.
    pub async fn download_all(&self, zones: &[ZoneId], dir: &Path) -> BatchReport {
        let inner = &self.inner;
        self.download_all_with(
            zones,
            dir,
            &inner.config.file_name_template,
            &inner.coordinator,
        )
        .await
    }

    /// Download `zones` into `dir` with an explicit template and coordinator.
    pub async fn download_all_with(
        &self,
        zones: &[ZoneId],
        dir: &Path,
        template: &FileNameTemplate,
        coordinator: &DownloadCoordinator,
    ) -> BatchReport {
        let fetcher = self.fetcher().await;
        coordinator.run(fetcher, zones, dir, template).await
    }
}
