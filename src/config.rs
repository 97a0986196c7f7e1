use crate::{CallWhiz, Error, Result};
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

pub const ENV_API_KEY: &str = "CALLWHIZ_API_KEY";
pub const ENV_BASE_URL: &str = "CALLWHIZ_BASE_URL";
pub const ENV_API_VERSION: &str = "CALLWHIZ_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "CALLWHIZ_TIMEOUT_SECS";

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Revision of the remote API contract.
///
/// Both revisions share the envelope and error mapping; they differ in how the
/// credential is presented, where the API is mounted, and the resource shapes
/// the server returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// `X-API-Key` credential header, developer API mount point.
    V1,
    /// `Authorization: Bearer` credential header.
    #[default]
    V2,
}

impl ApiVersion {
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::V1 => "http://localhost:8000/v1/api/developer/v1",
            Self::V2 => "http://localhost:9000/v1",
        }
    }

    /// Header name and value carrying the credential.
    ///
    /// # Errors
    /// Returns an error if the key contains characters not allowed in a header.
    #[allow(clippy::result_large_err)]
    pub fn credential_header(self, api_key: &str) -> Result<(HeaderName, HeaderValue)> {
        let (name, raw) = match self {
            Self::V1 => (API_KEY_HEADER, api_key.to_string()),
            Self::V2 => (AUTHORIZATION, format!("Bearer {api_key}")),
        };
        let mut value = HeaderValue::from_str(&raw)?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            other => Err(Error::Validation(format!("unknown API version `{other}`"))),
        }
    }
}

/// Everything needed to construct a [`CallWhiz`] client.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub version: ApiVersion,
    /// Overrides the version's default mount point when set.
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub pool_idle_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .finish()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            version: ApiVersion::default(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }

    /// Load configuration from `CALLWHIZ_*` environment variables.
    ///
    /// # Errors
    /// Returns a validation error if the API key is missing or a value cannot be parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[allow(clippy::result_large_err)]
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| Error::Validation(format!("{ENV_API_KEY} is not set")))?;
        let mut config = Self::new(api_key);

        if let Some(version) = lookup(ENV_API_VERSION) {
            config.version = version.parse()?;
        }
        config.base_url = lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty());
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Validation(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// The effective base address, with a trailing slash so paths join under it.
    ///
    /// # Errors
    /// Returns an error if the configured address is not an absolute URL.
    #[allow(clippy::result_large_err)]
    pub fn resolved_base_url(&self) -> Result<Url> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.version.default_base_url());
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Validation("API key is required".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Validation("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Fluent construction of a [`CallWhiz`] client.
#[derive(Debug, Default)]
pub struct CallWhizBuilder {
    api_key: Option<String>,
    version: ApiVersion,
    base_url: Option<String>,
    timeout: Option<Duration>,
    pool_idle_timeout: Option<Duration>,
}

impl CallWhizBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub const fn version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Resolve the builder into a [`ClientConfig`] without opening a session.
    ///
    /// # Errors
    /// Returns a validation error if no API key was given.
    #[allow(clippy::result_large_err)]
    pub fn into_config(self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Validation("API key is required".to_string()))?;
        Ok(ClientConfig {
            api_key,
            version: self.version,
            base_url: self.base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(DEFAULT_POOL_IDLE_TIMEOUT),
        })
    }

    /// Build the client and open its HTTP session.
    ///
    /// # Errors
    /// Returns an error if configuration is incomplete or the HTTP client cannot be built.
    #[allow(clippy::result_large_err)]
    pub fn build(self) -> Result<CallWhiz> {
        CallWhiz::with_config(self.into_config()?)
    }
}
