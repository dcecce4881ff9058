//! HTTP client and service layer for the CZDS API.
//!
//! This module provides the main entry point [`CzdsClient`].
//!
//! # Example
//!
//! ```no_run
//! use czds_rs::{ClientConfig, CzdsClient, Session};
//! use std::time::Duration;
//!
//! # async fn example() -> czds_rs::Result<()> {
//! let session = Session::new("user@example.com", "password");
//! let config = ClientConfig::default().with_connect_timeout(Duration::from_secs(10));
//! let client = CzdsClient::with_session(session, config)?;
//! client.refresh_session().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::ClientConfig;
pub use http::CzdsClient;
pub(crate) use http::ClientInner;
