//! Spec publishing: replace any same-named remote spec with the local document.

use crate::app::AppContext;
use crate::domain::{AppError, SpecDocument, extract_id};
use crate::ports::{CreateSpecRequest, PostmanApi};

/// Publish `document` under `name` and return the new spec id.
///
/// Same-named specs are deleted first; delete failures are logged and ignored.
pub fn execute<C: PostmanApi>(
    ctx: &AppContext<C>,
    name: &str,
    document: &SpecDocument,
) -> Result<String, AppError> {
    let client = ctx.client();
    let workspace_id = ctx.workspace_id();

    for existing in client.list_specs(workspace_id)?.iter().filter(|spec| spec.name == name) {
        tracing::info!(spec_id = %existing.id, name, "deleting existing spec");
        if let Err(err) = client.delete_spec(&existing.id) {
            tracing::warn!(spec_id = %existing.id, error = %err, "failed to delete existing spec");
        }
    }

    tracing::info!(name, path = %document.path.display(), workspace_id, "uploading spec");
    let request = CreateSpecRequest::from_document(name, document);
    let response = client.create_spec(workspace_id, &request)?;

    let spec_id = extract_id(&response, "spec").ok_or_else(|| AppError::MissingIdentifier {
        what: "spec",
        response: response.to_string(),
    })?;
    tracing::info!(spec_id = %spec_id, "created spec");
    Ok(spec_id)
}
