use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Upstream salary dataset.
pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

/// Overrides the data source: a URL or a local file path.
pub const SOURCE_ENV_VAR: &str = "SALARY_DASHBOARD_SOURCE";

/// HTTP timeout in whole seconds.
pub const TIMEOUT_ENV_VAR: &str = "SALARY_DASHBOARD_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("SALARY_DASHBOARD_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Where the salary table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` are URLs, anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub http_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            http_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DashboardConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(SOURCE_ENV_VAR).ok(),
            std::env::var(TIMEOUT_ENV_VAR).ok(),
        )
    }

    /// Blank values count as unset.
    pub fn from_vars(source: Option<String>, timeout: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = source.filter(|s| !s.trim().is_empty()) {
            config.source = DataSource::parse(&raw);
        }

        if let Some(raw) = timeout.filter(|s| !s.trim().is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_upstream_csv() {
        let config = DashboardConfig::from_vars(None, None).unwrap();
        assert_eq!(config.source, DataSource::Url(DEFAULT_DATA_URL.to_string()));
        assert_eq!(config.http_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn source_override_distinguishes_urls_and_paths() {
        let config =
            DashboardConfig::from_vars(Some("HTTPS://example.com/s.csv".into()), None).unwrap();
        assert_eq!(config.source, DataSource::Url("HTTPS://example.com/s.csv".into()));

        let config = DashboardConfig::from_vars(Some(" data/s.parquet ".into()), None).unwrap();
        assert_eq!(config.source, DataSource::File(PathBuf::from("data/s.parquet")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = DashboardConfig::from_vars(Some("  ".into()), Some("".into())).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn timeout_must_be_positive_integer() {
        let config = DashboardConfig::from_vars(None, Some("5".into())).unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(5));

        assert_eq!(
            DashboardConfig::from_vars(None, Some("0".into())),
            Err(ConfigError::InvalidTimeout("0".into()))
        );
        assert!(DashboardConfig::from_vars(None, Some("soon".into())).is_err());
    }
}
