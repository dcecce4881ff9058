//! Output file naming.

use std::fmt;

use crate::models::ZoneId;
use crate::{Error, Result};

const PLACEHOLDER: &str = "%s";

/// Default template: `xbox` is saved as `xbox.zone`.
pub const DEFAULT_FILE_NAME_TEMPLATE: &str = "%s.zone";

/// A printf-style file name template with `%s` standing for the zone.
///
/// # Example
///
/// ```
/// use czds_rs::{FileNameTemplate, ZoneId};
///
/// let template = FileNameTemplate::new("%s.txt")?;
/// assert_eq!(template.render(&ZoneId::new("xbox"))?, "xbox.txt");
/// # Ok::<(), czds_rs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameTemplate(String);

impl FileNameTemplate {
    /// Validate and wrap a template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the template has no `%s` or
    /// contains a path separator.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(Error::InvalidInput(format!(
                "File name template {:?} has no %s placeholder",
                template
            )));
        }
        if has_separator(&template) {
            return Err(Error::InvalidInput(format!(
                "File name template {:?} must not contain a path separator",
                template
            )));
        }
        Ok(Self(template))
    }

    /// The file name for `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the identifier is empty, `.`,
    /// `..`, or contains a path separator.
    pub fn render(&self, zone: &ZoneId) -> Result<String> {
        let label = zone.as_str();
        if label.is_empty() || label == "." || label == ".." || has_separator(label) {
            return Err(Error::InvalidInput(format!(
                "Zone identifier {:?} cannot be used as a file name",
                label
            )));
        }
        Ok(self.0.replace(PLACEHOLDER, label))
    }

    /// The raw template.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FileNameTemplate {
    fn default() -> Self {
        Self(DEFAULT_FILE_NAME_TEMPLATE.to_string())
    }
}

impl fmt::Display for FileNameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn has_separator(s: &str) -> bool {
    s.contains('/') || s.contains('\\') || s.contains('\0')
}
