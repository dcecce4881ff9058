//! # czds-rs
//!
//! An async Rust client for the ICANN Centralized Zone Data Service (CZDS).
//!
//! CZDS hands out bulk DNS zone files for generic top-level domains to
//! approved accounts. This crate covers the whole download path:
//!
//! - **Authentication**: exchange account credentials for a bearer token
//! - **Entitlements**: list the zones the token may download
//! - **Downloads**: fetch gzip-compressed zone files as lazily decompressed
//!   streams, or save many of them concurrently with per-zone error isolation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use czds_rs::CzdsClient;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> czds_rs::Result<()> {
//!     let client = CzdsClient::login("user@example.com", "password").await?;
//!
//!     let zones = client.zones().list().await?.zones();
//!     println!("Entitled to {} zones", zones.len());
//!
//!     let report = client
//!         .zones()
//!         .download_all(&zones, Path::new("./zones"))
//!         .await;
//!     println!("{} saved, {} failed", report.completed(), report.failed());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming a single zone
//!
//! ```rust,no_run
//! use czds_rs::{CzdsClient, ZoneId};
//! use futures_util::StreamExt;
//!
//! # async fn example(client: CzdsClient) -> czds_rs::Result<()> {
//! let zone = client.zones().fetch(&ZoneId::new("xbox")).await?;
//! let mut stream = zone.into_stream();
//! while let Some(chunk) = stream.next().await {
//!     let chunk = chunk?;
//!     // parse records...
//!     # let _ = chunk;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Tokens
//!
//! Tokens are never refreshed automatically. Operations attempted without a
//! token fail with [`Error::MustRefresh`] before any request is made; call
//! [`CzdsClient::refresh_session`] and try again. A running batch uses the
//! token it was started with.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod download;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{Authenticator, Credentials, Session};
pub use client::{ClientConfig, CzdsClient};
pub use download::{
    BatchReport, DownloadCoordinator, FileNameTemplate, ZoneFailure, ZoneFile, ZoneResult,
};
pub use error::{Error, ErrorKind, Result};
pub use models::{ZoneId, ZoneList, DEFAULT_AUTH_URL, DEFAULT_BASE_URL};

/// Prelude module for convenient imports.
///
/// ```rust
/// use czds_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{Authenticator, Credentials, Session};
    pub use crate::client::{ClientConfig, CzdsClient};
    pub use crate::download::{
        BatchReport, DownloadCoordinator, FileNameTemplate, ZoneFailure, ZoneFetcher, ZoneFile,
        ZoneOutcome, ZoneResult, ZoneStream,
    };
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{ZoneId, ZoneList};
}
