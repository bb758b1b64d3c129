use std::fs;
use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::PostmanApi;

/// File name used for an exported collection.
pub fn export_file_name(collection_id: &str) -> String {
    format!("collection-{}.json", collection_id)
}

/// Fetch the collection and write it as pretty JSON into `output_dir`.
pub fn execute<C: PostmanApi>(
    ctx: &AppContext<C>,
    collection_id: &str,
    output_dir: &Path,
) -> Result<PathBuf, AppError> {
    let collection = ctx.client().get_collection(collection_id)?;

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(export_file_name(collection_id));
    let mut content =
        serde_json::to_string_pretty(&collection).map_err(|err| AppError::ParseError {
            what: format!("collection {}", collection_id),
            details: err.to_string(),
        })?;
    content.push('\n');
    fs::write(&path, content)?;

    tracing::info!(collection_id, path = %path.display(), "exported collection");
    Ok(path)
}
