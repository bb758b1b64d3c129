//! Local OpenAPI documents and their display names.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Dialect tag sent with every spec upload.
pub const SPEC_DIALECT: &str = "OPENAPI:3.0";

/// Serialization format of a spec document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Yaml,
    Json,
}

impl ContentType {
    /// Infer the content type from a file extension. Anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ContentType::Json,
            _ => ContentType::Yaml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Yaml => "yaml",
            ContentType::Json => "json",
        }
    }

    /// Root file path used inside the remote spec.
    pub fn root_file(&self) -> &'static str {
        match self {
            ContentType::Yaml => "index.yaml",
            ContentType::Json => "index.json",
        }
    }
}

/// A spec document read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDocument {
    pub path: PathBuf,
    pub name: String,
    pub content: String,
    pub content_type: ContentType,
}

impl SpecDocument {
    /// Build a document from raw content, deriving its display name.
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        let path = path.into();
        let name = display_name(&content, &path);
        let content_type = ContentType::from_path(&path);
        Self { path, name, content, content_type }
    }

    /// Replace the derived display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name of the collection generated from this document.
    pub fn collection_name(&self) -> String {
        format!("{} Collection", self.name)
    }
}

#[derive(Deserialize)]
struct TitleFields {
    info: Option<InfoFields>,
}

#[derive(Deserialize)]
struct InfoFields {
    title: Option<serde_yaml::Value>,
}

/// Display name of a document: `info.title` when present, else derived from the filename.
pub fn display_name(content: &str, path: &Path) -> String {
    match document_title(content) {
        Some(title) => title,
        None => name_from_filename(path),
    }
}

fn document_title(content: &str) -> Option<String> {
    let fields: TitleFields = match serde_yaml::from_str(content) {
        Ok(fields) => fields,
        Err(err) => {
            tracing::debug!(error = %err, "spec title unreadable; using filename");
            return None;
        }
    };
    let title = match fields.info?.title? {
        serde_yaml::Value::String(title) => title,
        serde_yaml::Value::Number(title) => title.to_string(),
        serde_yaml::Value::Bool(title) => title.to_string(),
        _ => return None,
    };
    if title.trim().is_empty() { None } else { Some(title) }
}

/// Human-readable name from a file stem: separators become spaces, words are title-cased.
pub fn name_from_filename(path: &Path) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    stem.split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
