//! Configuration loading: env file, `specboard.toml`, environment variables, and flags.

use std::path::{Path, PathBuf};

use url::Url;

use crate::domain::AppError;

use super::onboard_config::{ConfigFile, OnboardConfig};

pub const CONFIG_FILE_NAME: &str = "specboard.toml";
pub const API_KEY_ENV: &str = "POSTMAN_API_KEY";
pub const WORKSPACE_ID_ENV: &str = "POSTMAN_WORKSPACE_ID";
pub const API_URL_ENV: &str = "POSTMAN_API_URL";
pub const SPEC_PATH_ENV: &str = "SPEC_PATH";
pub const DEFAULT_SPEC_PATH: &str = "specs";

/// Values supplied on the command line. Each one wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub workspace_id: Option<String>,
    pub api_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Load a key-value env file into the process environment.
///
/// An explicit path must exist. Without one, `.env` in the working directory is loaded
/// if present. Variables already set in the process are left untouched.
pub fn load_env_file(path: Option<&Path>) -> Result<(), AppError> {
    match path {
        Some(path) => dotenv::from_path(path).map_err(|err| {
            AppError::config_error(format!("Failed to load env file {}: {}", path.display(), err))
        }),
        None => {
            if let Ok(loaded) = dotenv::dotenv() {
                tracing::debug!(path = %loaded.display(), "loaded env file");
            }
            Ok(())
        }
    }
}

/// Load `specboard.toml` from an explicit path, or from `dir` when present.
pub fn load_config_file(explicit: Option<&Path>, dir: &Path) -> Result<ConfigFile, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                return Ok(ConfigFile::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<ConfigFile, AppError> {
    let config: ConfigFile = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Resolve credentials and overrides against the process environment.
pub fn resolve(overrides: &ConfigOverrides, file: ConfigFile) -> Result<OnboardConfig, AppError> {
    resolve_with(overrides, file, |key| std::env::var(key).ok())
}

/// Resolve configuration using `lookup` for environment variables.
pub fn resolve_with<F>(
    overrides: &ConfigOverrides,
    mut file: ConfigFile,
    lookup: F,
) -> Result<OnboardConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |flag: &Option<String>, env: &str| {
        flag.clone()
            .or_else(|| lookup(env))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let api_key = pick(&overrides.api_key, API_KEY_ENV).ok_or(AppError::MissingSetting {
        setting: "Postman API key",
        env_var: API_KEY_ENV,
        flag: "api-key",
    })?;
    let workspace_id =
        pick(&overrides.workspace_id, WORKSPACE_ID_ENV).ok_or(AppError::MissingSetting {
            setting: "Postman workspace id",
            env_var: WORKSPACE_ID_ENV,
            flag: "workspace-id",
        })?;

    if let Some(api_url) = pick(&overrides.api_url, API_URL_ENV) {
        file.postman.api_url = Url::parse(&api_url).map_err(|err| AppError::ParseError {
            what: "Postman API URL".to_string(),
            details: format!("'{}': {}", api_url, err),
        })?;
    }
    file.validate()?;

    Ok(OnboardConfig::new(api_key, workspace_id, file))
}

/// Spec location from the flag, `SPEC_PATH`, or the `specs` default.
pub fn resolve_spec_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(SPEC_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SPEC_PATH))
}
