//! Zone file download, decompression and persistence.
//!
//! - [`ZoneFetcher`] downloads one zone and opens its gzip body as a lazy
//!   [`ZoneStream`] of decompressed bytes.
//! - [`DownloadCoordinator`] runs the fetcher over many zones with a fixed
//!   number of workers and writes each zone to its own file.
//!
//! # Example
//!
//! ```no_run
//! use czds_rs::CzdsClient;
//! use std::path::Path;
//!
//! # async fn example() -> czds_rs::Result<()> {
//! let client = CzdsClient::login("user@example.com", "password").await?;
//! let zones = client.zones().list().await?.zones();
//! let report = client
//!     .zones()
//!     .download_all(&zones, Path::new("./zones"))
//!     .await;
//! for (zone, error) in report.failures() {
//!     eprintln!("{}: {}", zone, error);
//! }
//! # Ok(())
//! # }
//! ```

mod coordinator;
mod fetcher;
mod stream;
mod template;

pub use coordinator::{BatchReport, DownloadCoordinator, ZoneOutcome, DEFAULT_CONCURRENCY};
pub use fetcher::{ZoneFailure, ZoneFetcher, ZoneResult};
pub use stream::{ZoneFile, ZoneStream};
pub use template::{FileNameTemplate, DEFAULT_FILE_NAME_TEMPLATE};
