//! Bounded-concurrency batch downloads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::fetcher::ZoneFetcher;
use super::template::FileNameTemplate;
use crate::models::ZoneId;
use crate::{Error, ErrorKind, Result};

/// Default number of zones downloaded at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Outcome of one zone in a batch.
#[derive(Debug)]
pub struct ZoneOutcome {
    /// The zone
    pub zone: ZoneId,
    /// Where the zone was written, or why it was not
    pub result: Result<PathBuf>,
}

impl ZoneOutcome {
    /// Returns `true` if the zone was saved.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-zone outcomes of a batch, in submission order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<ZoneOutcome>,
}

impl BatchReport {
    /// All outcomes, in the order the zones were submitted.
    pub fn outcomes(&self) -> &[ZoneOutcome] {
        &self.outcomes
    }

    /// Number of zones saved.
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of zones that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    /// Number of zones submitted.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if every zone was saved.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Saved zones and their paths.
    pub fn successes(&self) -> impl Iterator<Item = (&ZoneId, &Path)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|p| (&o.zone, p.as_path())))
    }

    /// Failed zones and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&ZoneId, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.zone, e)))
    }

    /// Failed zones of one kind, e.g. every zone whose terms are not accepted.
    pub fn failures_of(&self, kind: ErrorKind) -> Vec<&ZoneId> {
        self.failures()
            .filter(|(_, e)| e.kind() == kind)
            .map(|(zone, _)| zone)
            .collect()
    }

    /// Consume the report.
    pub fn into_outcomes(self) -> Vec<ZoneOutcome> {
        self.outcomes
    }
}

/// Downloads a set of zones with a fixed number of workers.
///
/// Each zone is fetched and then written to disk by its own task. One
/// zone's failure is logged and recorded in the [`BatchReport`]; it never
/// stops the others. Concurrency 1 downloads strictly one zone at a time.
///
/// # Example
///
/// ```no_run
/// use czds_rs::download::{DownloadCoordinator, ZoneFetcher};
/// use czds_rs::{FileNameTemplate, Session, ZoneId};
/// use std::path::Path;
///
/// # async fn example(session: Session) -> czds_rs::Result<()> {
/// let fetcher = ZoneFetcher::from_session(reqwest::Client::new(), &session).await;
/// let report = DownloadCoordinator::new(8)?
///     .run(
///         fetcher,
///         &[ZoneId::new("xbox"), ZoneId::new("app")],
///         Path::new("./zones"),
///         &FileNameTemplate::default(),
///     )
///     .await;
/// println!("{} saved, {} failed", report.completed(), report.failed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DownloadCoordinator {
    concurrency: usize,
    cancel: CancellationToken,
}

impl DownloadCoordinator {
    /// Create a coordinator running at most `concurrency` downloads at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `concurrency` is zero.
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::InvalidInput(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            concurrency,
            cancel: CancellationToken::new(),
        })
    }

    /// Stop the batch when `cancel` fires.
    ///
    /// Zones already being downloaded finish; zones not yet started are
    /// reported as [`Error::Cancelled`] without any request.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The configured number of workers.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// The token that cancels this coordinator's batches.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Download every zone into `dir` and wait for all of them.
    ///
    /// `dir` must exist. Identifiers that cannot be rendered into a file
    /// name fail without a request. Dropping the returned future aborts the
    /// downloads still running and removes their partial files.
    #[instrument(skip_all, fields(dir = %dir.display(), zones = zones.len(), concurrency = self.concurrency))]
    pub async fn run(
        &self,
        fetcher: ZoneFetcher,
        zones: &[ZoneId],
        dir: &Path,
        template: &FileNameTemplate,
    ) -> BatchReport {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let fetcher = Arc::new(fetcher);
        let mut tasks = JoinSet::new();
        let mut slots = HashMap::with_capacity(zones.len());

        info!("starting zone downloads");

        for (index, zone) in zones.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&fetcher);
            let cancel = self.cancel.clone();
            let dir = dir.to_path_buf();
            let template = template.clone();
            let zone = zone.clone();

            let handle = tasks.spawn(async move {
                let path = dir.join(template.render(&zone)?);

                // The semaphore is never closed
                let _permit = semaphore.acquire_owned().await.ok();

                if cancel.is_cancelled() {
                    return Err(Error::Cancelled { zone });
                }

                let file = fetcher.fetch(&zone).await?;
                file.save_to(path).await
            });
            slots.insert(handle.id(), index);
        }

        debug!(task_count = tasks.len(), "waiting for downloads to complete");

        let mut results: Vec<Option<Result<PathBuf>>> = zones.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, joined) = match joined {
                Ok((id, result)) => (id, Ok(result)),
                Err(e) => (e.id(), Err(e.to_string())),
            };
            let Some(&index) = slots.get(&id) else {
                continue;
            };
            results[index] = Some(joined.unwrap_or_else(|message| {
                Err(Error::Task {
                    zone: zones[index].clone(),
                    message,
                })
            }));
        }

        let outcomes = zones
            .iter()
            .cloned()
            .zip(results)
            .map(|(zone, result)| {
                let result = result.unwrap_or_else(|| {
                    Err(Error::Task {
                        zone: zone.clone(),
                        message: "task vanished without a result".to_string(),
                    })
                });
                if let Err(e) = &result {
                    warn!(zone = %zone, error = %e, "zone download failed");
                }
                ZoneOutcome { zone, result }
            })
            .collect();

        let report = BatchReport { outcomes };
        info!(
            completed = report.completed(),
            failed = report.failed(),
            total = report.total(),
            "zone downloads complete"
        );
        report
    }
}

impl Default for DownloadCoordinator {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            cancel: CancellationToken::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(zone: &str, result: Result<PathBuf>) -> ZoneOutcome {
        ZoneOutcome {
            zone: ZoneId::new(zone),
            result,
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = DownloadCoordinator::new(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(DownloadCoordinator::new(1).unwrap().concurrency(), 1);
        assert_eq!(
            DownloadCoordinator::default().concurrency(),
            DEFAULT_CONCURRENCY
        );
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            outcomes: vec![
                outcome("a", Ok(PathBuf::from("/tmp/a.zone"))),
                outcome("b", Err(Error::ZoneNotExist { zone: ZoneId::new("b") })),
                outcome("c", Err(Error::TermsNotAccepted { zone: ZoneId::new("c") })),
                outcome("d", Ok(PathBuf::from("/tmp/d.zone"))),
            ],
        };

        assert_eq!(report.total(), 4);
        assert_eq!(report.completed(), 2);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
        assert_eq!(
            report.failures_of(ErrorKind::TermsNotAccepted),
            vec![&ZoneId::new("c")]
        );
        let saved: Vec<_> = report.successes().map(|(z, _)| z.as_str()).collect();
        assert_eq!(saved, ["a", "d"]);
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(BatchReport::default().is_success());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let session = crate::Session::new("user", "pass");
        let fetcher = ZoneFetcher::from_session(reqwest::Client::new(), &session).await;
        let dir = tempfile::tempdir().unwrap();
        let report = DownloadCoordinator::new(2)
            .unwrap()
            .run(fetcher, &[], dir.path(), &FileNameTemplate::default())
            .await;
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_batch_reports_every_zone() {
        let session = crate::Session::new("user", "pass")
            .with_base_url("http://127.0.0.1:1")
            .unwrap();
        let fetcher = ZoneFetcher::from_session(reqwest::Client::new(), &session).await;
        let dir = tempfile::tempdir().unwrap();
        let zones = [ZoneId::new("a"), ZoneId::new("b"), ZoneId::new("c")];

        let report = DownloadCoordinator::new(2)
            .unwrap()
            .run(fetcher, &zones, dir.path(), &FileNameTemplate::default())
            .await;

        assert_eq!(report.failed(), 3);
        assert_eq!(report.failures_of(ErrorKind::MustRefresh).len(), 3);
        let order: Vec<_> = report.outcomes().iter().map(|o| o.zone.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }
}
