//! Authentication and session management for the CZDS API.
//!
//! CZDS uses a two-step scheme: the ICANN account API exchanges a
//! username/password pair for a bearer token, and every CZDS request
//! carries that token. There is no refresh token; a new token is obtained
//! by authenticating again.
//!
//! ```no_run
//! use czds_rs::{Authenticator, Session};
//!
//! # async fn example() -> czds_rs::Result<()> {
//! let session = Session::new("user@example.com", "password");
//! Authenticator::new(reqwest::Client::new())
//!     .refresh(&session)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Tokens are never refreshed behind the caller's back. When an operation
//! fails with [`Error::MustRefresh`](crate::Error::MustRefresh), refresh and
//! retry. Do not refresh while relying on a batch to pick up the new token:
//! batches use the token they started with.

mod authenticator;
mod session;

pub use authenticator::Authenticator;
pub use session::{Credentials, Session};
