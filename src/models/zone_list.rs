//! Zone download link catalog.

use serde::{Deserialize, Serialize};

use super::primitives::ZoneId;
use crate::Result;

/// The download links an access token is entitled to, as returned by
/// `GET /czds/downloads/links`.
///
/// Order and duplicates are kept exactly as the API returned them.
///
/// # Example
///
/// ```
/// use czds_rs::models::ZoneList;
///
/// let body = br#"["https://czds-api.icann.org/czds/downloads/xbox.zone"]"#;
/// let list = ZoneList::from_slice(body)?;
/// assert_eq!(list.zones()[0].as_str(), "xbox");
/// # Ok::<(), czds_rs::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneList(Vec<String>);

impl ZoneList {
    /// Create a list from raw download links.
    pub fn new(links: Vec<String>) -> Self {
        Self(links)
    }

    /// Parse a JSON array of strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) for any other JSON shape.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(Self(serde_json::from_slice(body)?))
    }

    /// The zone identifiers of every link, in link order.
    pub fn zones(&self) -> Vec<ZoneId> {
        self.0.iter().map(|link| ZoneId::from_link(link)).collect()
    }

    /// The raw download links.
    pub fn links(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the raw download links.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the account is entitled to no zone at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ZoneList {
    fn from(links: Vec<String>) -> Self {
        Self(links)
    }
}

impl IntoIterator for ZoneList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ZoneList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
