pub mod loader;
pub mod onboard_config;

pub use loader::{
    ConfigOverrides, load_config_file, load_env_file, parse_config_content, resolve,
    resolve_spec_path, resolve_with,
};
pub use onboard_config::{
    ConfigFile, EnvironmentTarget, GenerationConfig, OnboardConfig, PostmanApiConfig,
    ScriptConfig,
};
