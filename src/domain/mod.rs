pub mod collection;
pub mod configuration;
pub mod environment;
pub mod error;
pub mod prerequest_script;
pub mod remote;
pub mod spec_document;

pub use collection::{Collection, Event, PREREQUEST, Script};
pub use configuration::{
    ConfigFile, ConfigOverrides, EnvironmentTarget, GenerationConfig, OnboardConfig,
    PostmanApiConfig, ScriptConfig,
};
pub use environment::{Environment, EnvironmentVariable, VariableType};
pub use error::AppError;
pub use prerequest_script::jwt_prerequest_lines;
pub use remote::{RemoteRef, extract_id};
pub use spec_document::{ContentType, SPEC_DIALECT, SpecDocument};
