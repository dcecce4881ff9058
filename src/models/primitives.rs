//! Primitive types and newtypes for type-safe API interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ICANN account authentication endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://account-api.icann.org/api/authenticate";

/// Default CZDS API base URL.
pub const DEFAULT_BASE_URL: &str = "https://czds-api.icann.org";

/// A zone identifier, usually a top-level domain label such as `xbox`.
///
/// Identifiers are derived from download links by
/// [`ZoneList::zones`](crate::models::ZoneList::zones) or built directly.
/// No validation happens here; a link that does not look like a download
/// link degrades into whatever identifier its text yields, possibly empty.
///
/// # Example
///
/// ```
/// use czds_rs::ZoneId;
///
/// let zone = ZoneId::new("xbox");
/// assert_eq!(zone.as_str(), "xbox");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a new zone identifier.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Derive the identifier from a download link.
    ///
    /// Takes the last `/`-separated segment and keeps everything before its
    /// first `.`: `https://czds-api.icann.org/czds/downloads/xbox.zone`
    /// becomes `xbox`.
    pub fn from_link(link: &str) -> Self {
        let file = link.rsplit('/').next().unwrap_or(link);
        let label = file.split('.').next().unwrap_or(file);
        Self(label.to_string())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ZoneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ZoneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_id() {
        let zone = ZoneId::new("xbox");
        assert_eq!(zone.as_str(), "xbox");
        assert_eq!(zone.to_string(), "xbox");
    }

    #[test]
    fn test_from_link() {
        assert_eq!(
            ZoneId::from_link("https://czds-api.icann.org/czds/downloads/xbox.zone"),
            ZoneId::new("xbox")
        );
        assert_eq!(
            ZoneId::from_link("https://x/czds/downloads/co.uk.zone"),
            ZoneId::new("co")
        );
    }

    #[test]
    fn test_from_link_degrades() {
        // No slash: the whole string is the last segment
        assert_eq!(ZoneId::from_link("xbox.zone"), ZoneId::new("xbox"));
        // No dot: the whole segment is the identifier
        assert_eq!(ZoneId::from_link("https://x/downloads/xbox"), ZoneId::new("xbox"));
        assert_eq!(ZoneId::from_link("...notok"), ZoneId::new(""));
        assert_eq!(ZoneId::from_link(""), ZoneId::new(""));
        assert_eq!(ZoneId::from_link("https://x/downloads/"), ZoneId::new(""));
    }
}
