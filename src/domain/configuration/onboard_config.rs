use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Contents of `specboard.toml`.
///
/// Credentials never live here; they come from the process environment or flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Postman API transport configuration.
    #[serde(default)]
    pub postman: PostmanApiConfig,
    /// Collection generation polling and cleanup timing.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Pre-request script parameters.
    #[serde(default)]
    pub script: ScriptConfig,
    /// Deployment environments created for every onboarded spec.
    #[serde(default = "default_environments")]
    pub environments: Vec<EnvironmentTarget>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            postman: PostmanApiConfig::default(),
            generation: GenerationConfig::default(),
            script: ScriptConfig::default(),
            environments: default_environments(),
        }
    }
}

impl ConfigFile {
    pub fn validate(&self) -> Result<(), AppError> {
        self.postman.validate()?;
        self.generation.validate()?;
        let mut seen = std::collections::BTreeSet::new();
        for target in &self.environments {
            target.validate()?;
            if !seen.insert(target.name.to_ascii_uppercase()) {
                return Err(AppError::config_error(format!(
                    "Duplicate environment '{}' in configuration",
                    target.name
                )));
            }
        }
        Ok(())
    }
}

/// Postman API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostmanApiConfig {
    /// Postman API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts for a retryable request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Fixed delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for PostmanApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl PostmanApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(AppError::config_error("max_retries must be greater than 0"));
        }
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(AppError::config_error(format!(
                "api_url must be http(s), got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }
}

/// Timing for asynchronous collection generation and stale-collection cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Number of listing attempts before generation is declared failed.
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    /// Fixed delay between listing attempts in milliseconds.
    #[serde(default = "default_poll_delay_ms")]
    pub poll_delay_ms: u64,
    /// Delay before stale collections are deleted, in milliseconds.
    #[serde(default = "default_cleanup_delay_ms")]
    pub cleanup_delay_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            poll_attempts: default_poll_attempts(),
            poll_delay_ms: default_poll_delay_ms(),
            cleanup_delay_ms: default_cleanup_delay_ms(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.poll_attempts == 0 {
            return Err(AppError::config_error("poll_attempts must be greater than 0"));
        }
        Ok(())
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms)
    }
}

/// Parameters baked into the JWT pre-request script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// Subtracted from the token lifetime when computing the cached expiry.
    #[serde(default = "default_token_expiry_margin_ms")]
    pub token_expiry_margin_ms: u64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self { token_expiry_margin_ms: default_token_expiry_margin_ms() }
    }
}

/// One deployment environment (DEV, QA, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentTarget {
    /// Short name, rendered upper-case in the environment display name.
    pub name: String,
    pub base_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl EnvironmentTarget {
    fn new(name: &str, base_url: &str, token_url: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            token_url: token_url.to_string(),
            client_id: format!("{{{{{upper}_CLIENT_ID}}}}"),
            client_secret: format!("{{{{{upper}_CLIENT_SECRET}}}}"),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::config_error("environment name must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(AppError::config_error(format!(
                "environment '{}' is missing base_url",
                self.name
            )));
        }
        Ok(())
    }

    /// Display name of the Postman environment for a given spec.
    pub fn display_name(&self, spec_name: &str) -> String {
        format!("{} - {}", spec_name, self.name.to_ascii_uppercase())
    }
}

/// Fully resolved configuration threaded through every operation.
#[derive(Clone)]
pub struct OnboardConfig {
    pub api_key: String,
    pub workspace_id: String,
    pub postman: PostmanApiConfig,
    pub generation: GenerationConfig,
    pub script: ScriptConfig,
    pub environments: Vec<EnvironmentTarget>,
}

impl std::fmt::Debug for OnboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardConfig")
            .field("api_key", &"[REDACTED]")
            .field("workspace_id", &self.workspace_id)
            .field("postman", &self.postman)
            .field("generation", &self.generation)
            .field("script", &self.script)
            .field("environments", &self.environments)
            .finish()
    }
}

impl OnboardConfig {
    pub fn new(api_key: String, workspace_id: String, file: ConfigFile) -> Self {
        Self {
            api_key,
            workspace_id,
            postman: file.postman,
            generation: file.generation,
            script: file.script,
            environments: file.environments,
        }
    }
}

pub const DEFAULT_API_URL: &str = "https://api.getpostman.com";

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_poll_attempts() -> u32 {
    15
}

fn default_poll_delay_ms() -> u64 {
    2000
}

fn default_cleanup_delay_ms() -> u64 {
    1000
}

fn default_token_expiry_margin_ms() -> u64 {
    5000
}

fn default_environments() -> Vec<EnvironmentTarget> {
    vec![
        EnvironmentTarget::new(
            "dev",
            "https://dev.api.company/payments",
            "https://auth.dev.company/oauth2/token",
        ),
        EnvironmentTarget::new(
            "qa",
            "https://qa.api.company/payments",
            "https://auth.qa.company/oauth2/token",
        ),
        EnvironmentTarget::new(
            "uat",
            "https://uat.api.company/payments",
            "https://auth.uat.company/oauth2/token",
        ),
        EnvironmentTarget::new(
            "prod",
            "https://api.company/payments",
            "https://auth.company/oauth2/token",
        ),
    ]
}
