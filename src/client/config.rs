//! Client configuration options.

use std::time::Duration;

use crate::download::{FileNameTemplate, DEFAULT_CONCURRENCY};
use crate::{Error, Result};

/// Configuration for the CZDS client.
///
/// # Example
///
/// ```
/// use czds_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(600))
///     .with_user_agent("zone-mirror/1.0")
///     .with_concurrency(8)?;
/// # Ok::<(), czds_rs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overall per-request timeout; `None` leaves requests unbounded,
    /// which large zone files usually need
    pub timeout: Option<Duration>,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Workers used by batch downloads; must be at least 1
    pub concurrency: usize,
    /// File naming for batch downloads
    pub file_name_template: FileNameTemplate,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("czds-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            concurrency: DEFAULT_CONCURRENCY,
            file_name_template: FileNameTemplate::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the number of concurrent zone downloads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `concurrency` is zero.
    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::InvalidInput(
                "concurrency must be at least 1".to_string(),
            ));
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    /// Set the output file name template.
    pub fn with_file_name_template(mut self, template: FileNameTemplate) -> Self {
        self.file_name_template = template;
        self
    }

    pub(crate) fn build_http(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.timeout.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.file_name_template.as_str(), "%s.zone");
        assert!(config.user_agent.starts_with("czds-rs/"));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent")
            .with_concurrency(16)
            .unwrap()
            .with_file_name_template(FileNameTemplate::new("%s.txt").unwrap());
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.concurrency, 16);
        assert_eq!(config.file_name_template.as_str(), "%s.txt");
        assert!(config.build_http().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(ClientConfig::new().with_concurrency(0).is_err());
    }
}
