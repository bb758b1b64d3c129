//! Attach a pre-request script to a collection.

use crate::app::AppContext;
use crate::domain::{AppError, Collection};
use crate::ports::PostmanApi;

/// Replace the collection's top-level pre-request hook with `script_lines`.
///
/// Read-modify-write of the full collection; returns what was written.
pub fn execute<C: PostmanApi>(
    ctx: &AppContext<C>,
    collection_id: &str,
    script_lines: Vec<String>,
) -> Result<Collection, AppError> {
    let client = ctx.client();
    let mut collection = client.get_collection(collection_id)?;

    let replaced = collection.prerequest_events().count();
    collection.replace_prerequest(script_lines);

    tracing::info!(collection_id, replaced, "attaching pre-request script");
    client.put_collection(collection_id, &collection)?;
    Ok(collection)
}
