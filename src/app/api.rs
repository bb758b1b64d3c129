//! API Facade for the application.
//!
//! These functions load configuration, build the HTTP-backed context, and run a
//! single command. The CLI is a thin layer over them.

use std::path::{Path, PathBuf};

use crate::adapters::{FilesystemSpecSource, HttpPostmanClient};
use crate::app::AppContext;
use crate::app::commands::{environments, export, onboard};
use crate::domain::configuration::{load_config_file, load_env_file, resolve};
use crate::domain::{ConfigOverrides, OnboardConfig, SpecDocument};
use crate::ports::SpecSource;

pub use crate::app::commands::environments::EnsuredEnvironment;
pub use crate::app::commands::onboard::{OnboardOptions, OnboardReport, SpecOutcome};
pub use crate::domain::AppError;

/// Resolve configuration from the env file, `specboard.toml`, environment, and flags.
pub fn load_config(overrides: &ConfigOverrides) -> Result<OnboardConfig, AppError> {
    load_env_file(overrides.env_file.as_deref())?;
    let file = load_config_file(overrides.config_path.as_deref(), &std::env::current_dir()?)?;
    resolve(overrides, file)
}

/// Create an `AppContext` talking to the Postman API.
fn create_context(overrides: &ConfigOverrides) -> Result<AppContext<HttpPostmanClient>, AppError> {
    let config = load_config(overrides)?;
    let client = HttpPostmanClient::new(config.api_key.clone(), &config.postman)?;
    tracing::debug!(?config, "resolved configuration");
    Ok(AppContext::new(client, config))
}

/// Run the full onboarding workflow.
pub fn onboard(
    overrides: &ConfigOverrides,
    options: &OnboardOptions,
) -> Result<OnboardReport, AppError> {
    let ctx = create_context(overrides)?;
    onboard::execute(&ctx, &FilesystemSpecSource::new(), options)
}

/// Discover local spec documents without touching the network.
pub fn list_specs(path: &Path) -> Result<Vec<SpecDocument>, AppError> {
    FilesystemSpecSource::new().discover(path)
}

/// Write one collection to `output_dir`.
pub fn export_collection(
    overrides: &ConfigOverrides,
    collection_id: &str,
    output_dir: &Path,
) -> Result<PathBuf, AppError> {
    let ctx = create_context(overrides)?;
    export::execute(&ctx, collection_id, output_dir)
}

/// Create or refresh the configured environments for `spec_name`.
pub fn ensure_environments(
    overrides: &ConfigOverrides,
    spec_name: &str,
) -> Result<Vec<EnsuredEnvironment>, AppError> {
    let ctx = create_context(overrides)?;
    environments::ensure_all(&ctx, spec_name)
}
