//! Client configuration and credentials

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::PtvError;

/// Developer credentials issued by PTV
///
/// The API key never leaves the process: it only keys the request signature.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Developer id, sent as `devid` on every request
    pub developer_id: String,

    /// Shared secret used to sign requests (sensitive - uses SecretString)
    pub api_key: SecretString,
}

impl Credentials {
    /// Create credentials from a developer id and API key
    #[must_use]
    pub fn new(developer_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            developer_id: developer_id.into(),
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// Expose the API key for signing
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Check that both parts are present
    ///
    /// # Errors
    ///
    /// Returns an error if either the developer id or the API key is blank.
    pub fn validate(&self) -> Result<(), PtvError> {
        if self.developer_id.trim().is_empty() {
            return Err(PtvError::Configuration(
                "developer_id must not be empty".to_string(),
            ));
        }
        if self.api_key().trim().is_empty() {
            return Err(PtvError::Configuration(
                "api_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("developer_id", &self.developer_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Connection settings for the Timetable API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PtvConfig {
    /// Base URL of the Timetable API, without the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://timetableapi.ptv.vic.gov.au".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("ptv_timetable/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for PtvConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl PtvConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Base URL with any trailing slash removed
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), PtvError> {
        if self.normalized_base_url().is_empty() {
            return Err(PtvError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PtvError::Configuration(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(PtvError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Credentials and connection settings loaded together
#[derive(Debug, Clone)]
pub struct PtvSettings {
    /// Developer credentials
    pub credentials: Credentials,

    /// Connection settings
    pub config: PtvConfig,
}

/// Flat shape of `ptv.toml` and the `PTV_*` variables.
///
/// Fields are deserialized directly (no `flatten`) so numeric developer ids
/// such as `3001026` are coerced into strings by the `config` crate.
#[derive(Deserialize)]
struct RawSettings {
    developer_id: String,
    api_key: SecretString,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    user_agent: String,
}

impl From<RawSettings> for PtvSettings {
    fn from(raw: RawSettings) -> Self {
        Self {
            credentials: Credentials {
                developer_id: raw.developer_id,
                api_key: raw.api_key,
            },
            config: PtvConfig {
                base_url: raw.base_url,
                timeout_secs: raw.timeout_secs,
                user_agent: raw.user_agent,
            },
        }
    }
}

impl PtvSettings {
    /// Load settings from an optional `ptv.toml` and `PTV_*` environment
    /// variables (e.g. `PTV_DEVELOPER_ID`, `PTV_API_KEY`, `PTV_TIMEOUT_SECS`).
    ///
    /// Environment variables win over the file.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("ptv")
    }

    /// Same as [`PtvSettings::load`] with an explicit file stem or path
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("PTV").try_parsing(true));

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        let settings = Self::from(raw);
        settings
            .credentials
            .validate()
            .and_then(|()| settings.config.validate())
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = PtvConfig::default();
        assert_eq!(config.base_url, "http://timetableapi.ptv.vic.gov.au");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("ptv_timetable/"));
    }

    #[test]
    fn test_testing_config() {
        let config = PtvConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalized_base_url() {
        let config = PtvConfig {
            base_url: "http://localhost:8080//".to_string(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = PtvConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_http_base_url() {
        let config = PtvConfig {
            base_url: "ftp://timetableapi.ptv.vic.gov.au".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PtvError::Configuration(_))));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = PtvConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("3001026", "secret").validate().is_ok());
        assert!(Credentials::new("", "secret").validate().is_err());
        assert!(Credentials::new("3001026", "  ").validate().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let credentials = Credentials::new("3001026", "fa83ef37-71d1-49e3-afa1-b8a765327650");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("3001026"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("fa83ef37"));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: PtvConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, "http://timetableapi.ptv.vic.gov.au");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_settings_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"developer_id = "3001026"
api_key = "fa83ef37-71d1-49e3-afa1-b8a765327650"
base_url = "http://localhost:9000"
timeout_secs = 7"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let settings = PtvSettings::load_from(path).unwrap();
        assert_eq!(settings.credentials.developer_id, "3001026");
        assert_eq!(
            settings.credentials.api_key(),
            "fa83ef37-71d1-49e3-afa1-b8a765327650"
        );
        assert_eq!(settings.config.base_url, "http://localhost:9000");
        assert_eq!(settings.config.timeout_secs, 7);
    }

    #[test]
    fn test_settings_numeric_developer_id() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "developer_id = 3001026\napi_key = \"fa83ef37-71d1-49e3-afa1-b8a765327650\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let settings = PtvSettings::load_from(path).unwrap();
        assert_eq!(settings.credentials.developer_id, "3001026");
        assert_eq!(settings.config.base_url, "http://timetableapi.ptv.vic.gov.au");
        assert_eq!(settings.config.timeout_secs, 30);
    }

    #[test]
    fn test_settings_reject_blank_credentials() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "developer_id = \"\"\napi_key = \"secret\"").unwrap();

        let path = file.path().to_str().unwrap();
        assert!(PtvSettings::load_from(path).is_err());
    }
}
