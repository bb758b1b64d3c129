use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, SpecDocument};
use crate::ports::SpecSource;

/// Reads spec documents from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FilesystemSpecSource;

impl FilesystemSpecSource {
    pub fn new() -> Self {
        Self
    }
}

impl SpecSource for FilesystemSpecSource {
    fn discover(&self, path: &Path) -> Result<Vec<SpecDocument>, AppError> {
        if path.is_file() {
            return Ok(vec![read_document(path)?]);
        }
        if !path.is_dir() {
            return Err(AppError::SpecNotFound(path.display().to_string()));
        }

        let mut files = Vec::new();
        collect_yaml_files(path, &mut files)?;
        if files.is_empty() {
            return Err(AppError::NoSpecsFound(path.display().to_string()));
        }
        files.sort();

        files.iter().map(|file| read_document(file)).collect()
    }
}

fn read_document(path: &Path) -> Result<SpecDocument, AppError> {
    let content = fs::read_to_string(path)?;
    Ok(SpecDocument::new(path, content))
}

/// Symlinks are not followed, so link cycles cannot recurse forever.
fn collect_yaml_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), AppError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_yaml_files(&path, files)?;
        } else if file_type.is_file() && is_yaml(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
