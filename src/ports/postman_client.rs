//! Postman API port definition.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{AppError, Collection, Environment, RemoteRef, SPEC_DIALECT, SpecDocument};

/// Request to create a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSpecRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub dialect: String,
    pub files: Vec<SpecFile>,
}

/// A file inside a multi-file spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecFile {
    pub path: String,
    pub content: String,
}

impl CreateSpecRequest {
    /// Single-file spec named `name` holding the document's literal text.
    pub fn from_document(name: &str, document: &SpecDocument) -> Self {
        Self {
            name: name.to_string(),
            dialect: SPEC_DIALECT.to_string(),
            files: vec![SpecFile {
                path: document.content_type.root_file().to_string(),
                content: document.content.clone(),
            }],
        }
    }
}

/// Request to generate a collection from a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub name: String,
    pub options: GenerationOptions,
}

/// Structural options for collection generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub folder_strategy: String,
    pub enable_optional_parameters: bool,
    pub request_name_source: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            folder_strategy: "Paths".to_string(),
            enable_optional_parameters: true,
            request_name_source: "Fallback".to_string(),
        }
    }
}

impl GenerationRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), options: GenerationOptions::default() }
    }
}

/// Port for Postman API operations.
///
/// Create calls return the raw response body; callers extract identifiers from it.
pub trait PostmanApi {
    fn list_specs(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError>;
    fn create_spec(
        &self,
        workspace_id: &str,
        request: &CreateSpecRequest,
    ) -> Result<Value, AppError>;
    fn delete_spec(&self, spec_id: &str) -> Result<(), AppError>;

    /// Start asynchronous collection generation.
    fn generate_collection(
        &self,
        spec_id: &str,
        request: &GenerationRequest,
    ) -> Result<Value, AppError>;
    /// Collections generated from a spec so far.
    fn list_generated_collections(&self, spec_id: &str) -> Result<Vec<RemoteRef>, AppError>;

    fn list_collections(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError>;
    fn get_collection(&self, collection_id: &str) -> Result<Collection, AppError>;
    fn put_collection(&self, collection_id: &str, collection: &Collection)
    -> Result<(), AppError>;
    fn delete_collection(&self, collection_id: &str) -> Result<(), AppError>;

    fn list_environments(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError>;
    fn create_environment(
        &self,
        workspace_id: &str,
        environment: &Environment,
    ) -> Result<Value, AppError>;
    fn update_environment(
        &self,
        environment_id: &str,
        environment: &Environment,
    ) -> Result<(), AppError>;
    fn delete_environment(&self, environment_id: &str) -> Result<(), AppError>;
}
