use std::path::Path;

use crate::domain::{AppError, SpecDocument};

/// Port for discovering local spec documents.
pub trait SpecSource {
    /// Load a single file, or every YAML document under a directory.
    fn discover(&self, path: &Path) -> Result<Vec<SpecDocument>, AppError>;
}
