//! Service location and transport settings.
//!
//! # Design
//! `Settings` is the only place that knows how a catalog URL is put
//! together. The dispatcher receives the resolved URL and never builds one
//! itself. Settings can be assembled with the builder methods or read from
//! `ECONOMY_*` environment variables.

use std::time::Duration;

use crate::error::ApiError;

const DEFAULT_DOMAIN: &str = "playfabapi.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tag appended to every request URL so the service can tell SDK builds apart.
pub const SDK_TAG: &str = concat!("RustEconomySDK-", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub title_id: Option<String>,
    pub vertical_name: Option<String>,
    pub base_url: Option<String>,
    pub sdk_tag: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title_id: None,
            vertical_name: None,
            base_url: None,
            sdk_tag: SDK_TAG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Settings addressing the production host of `title_id`.
    pub fn for_title(title_id: impl Into<String>) -> Self {
        Self {
            title_id: Some(title_id.into()),
            ..Self::default()
        }
    }

    /// Settings addressing an explicit host, e.g. a local fixture server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Read settings from the environment.
    ///
    /// `ECONOMY_TITLE_ID`, `ECONOMY_VERTICAL_NAME`, `ECONOMY_BASE_URL` and
    /// `ECONOMY_TIMEOUT_SECS` are all optional; resolution fails later if
    /// neither a base URL nor a title id ends up set.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let timeout = match non_empty("ECONOMY_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ApiError::Settings(format!("ECONOMY_TIMEOUT_SECS is not a number: {raw}"))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self {
            title_id: non_empty("ECONOMY_TITLE_ID"),
            vertical_name: non_empty("ECONOMY_VERTICAL_NAME"),
            base_url: non_empty("ECONOMY_BASE_URL"),
            timeout,
            ..Self::default()
        })
    }

    pub fn vertical(mut self, vertical_name: impl Into<String>) -> Self {
        self.vertical_name = Some(vertical_name.into());
        self
    }

    pub fn sdk_tag(mut self, tag: impl Into<String>) -> Self {
        self.sdk_tag = tag.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The service root, without a trailing slash.
    ///
    /// An explicit base URL wins; otherwise the host is built from the
    /// vertical name or, failing that, the title id.
    pub fn base_url(&self) -> Result<String, ApiError> {
        if let Some(url) = &self.base_url {
            return Ok(url.trim_end_matches('/').to_string());
        }
        let label = self
            .vertical_name
            .as_deref()
            .or(self.title_id.as_deref())
            .ok_or_else(|| {
                ApiError::Settings("neither a base URL nor a title id is set".to_string())
            })?;
        Ok(format!("https://{label}.{DEFAULT_DOMAIN}"))
    }

    /// Full URL for an endpoint path such as `/Catalog/GetItem`.
    pub fn url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url()?;
        let path = path.trim_start_matches('/');
        if self.sdk_tag.is_empty() {
            Ok(format!("{base}/{path}"))
        } else {
            Ok(format!("{base}/{path}?sdk={}", self.sdk_tag))
        }
    }
}
