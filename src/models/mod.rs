//! Data models for the CZDS API.
//!
//! - [`primitives`] - Zone identifiers and default endpoints
//! - [`zone_list`] - The download link catalog

pub mod primitives;
pub mod zone_list;

pub use primitives::*;
pub use zone_list::ZoneList;
