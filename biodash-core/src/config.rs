//! Dashboard configuration.

use std::time::Duration;

use crate::palette::Palette;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "BIODASH_BASE_URL";
/// Environment variable selecting the chart palette.
pub const ENV_PALETTE: &str = "BIODASH_PALETTE";
/// Environment variable overriding the request timeout (seconds, 0 disables).
pub const ENV_TIMEOUT_SECS: &str = "BIODASH_TIMEOUT_SECS";

/// Where to fetch data from and how to draw it.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Root URL of the data endpoints, without a trailing slash.
    pub base_url: String,
    /// Chart theme.
    pub palette: Palette,
    /// Global per-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl DashboardConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            palette: Palette::default(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Read overrides from `BIODASH_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url);
            }
        }
        if let Ok(name) = std::env::var(ENV_PALETTE) {
            match name.parse::<Palette>() {
                Ok(palette) => config.palette = palette,
                Err(e) => log::warn!("ignoring {ENV_PALETTE}: {e}"),
            }
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config = config.with_timeout_secs(secs),
                Err(e) => log::warn!("ignoring {ENV_TIMEOUT_SECS}={secs:?}: {e}"),
            }
        }
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the request timeout; zero disables it.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
