//! Removal of collections superseded by a fresh generation.
//!
//! Every regeneration creates a new collection, so the previous ones with the
//! same name pile up in the workspace. The inventory is captured before any
//! generation runs, which keeps freshly generated collections out of reach until
//! they are recorded as the kept collection for their name.

use std::collections::HashMap;

use crate::app::AppContext;
use crate::domain::{AppError, RemoteRef};
use crate::ports::PostmanApi;

/// Workspace collections grouped by name.
#[derive(Debug, Clone, Default)]
pub struct CollectionInventory {
    by_name: HashMap<String, Vec<RemoteRef>>,
}

impl CollectionInventory {
    /// Capture the current collection listing of the context's workspace.
    pub fn snapshot<C: PostmanApi>(ctx: &AppContext<C>) -> Result<Self, AppError> {
        let collections = ctx.client().list_collections(ctx.workspace_id())?;
        tracing::debug!(count = collections.len(), "captured collection inventory");
        Ok(Self::from_refs(collections))
    }

    pub fn from_refs(collections: impl IntoIterator<Item = RemoteRef>) -> Self {
        let mut by_name: HashMap<String, Vec<RemoteRef>> = HashMap::new();
        for collection in collections {
            by_name.entry(collection.name.clone()).or_default().push(collection);
        }
        Self { by_name }
    }

    /// Collections named `name`, except the one identified by `keep_id`.
    pub fn stale<'a>(
        &'a self,
        name: &str,
        keep_id: &'a str,
    ) -> impl Iterator<Item = &'a RemoteRef> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter(move |collection| !collection.matches_id(keep_id))
    }

    /// Forget `removed` collections and remember `kept` under its name.
    ///
    /// A later document onboarded under the same name then sees `kept` as stale.
    pub fn record(&mut self, kept: RemoteRef, removed: &[String]) {
        let entry = self.by_name.entry(kept.name.clone()).or_default();
        entry.retain(|collection| {
            !collection.matches_id(&kept.id) && !removed.contains(&collection.id)
        });
        entry.push(kept);
    }
}

/// Delete the stale `name` collections recorded in `inventory`, keeping `keep_id`.
///
/// Waits for the configured settle delay first. Individual delete failures are
/// logged and skipped; returns the ids that were removed.
pub fn execute<C: PostmanApi>(
    ctx: &AppContext<C>,
    inventory: &CollectionInventory,
    name: &str,
    keep_id: &str,
) -> Result<Vec<String>, AppError> {
    let stale: Vec<&RemoteRef> = inventory.stale(name, keep_id).collect();
    if stale.is_empty() {
        tracing::debug!(name, "no stale collections");
        return Ok(Vec::new());
    }

    std::thread::sleep(ctx.config().generation.cleanup_delay());

    let mut removed = Vec::with_capacity(stale.len());
    for collection in stale {
        tracing::info!(collection_id = %collection.id, name, "deleting stale collection");
        match ctx.client().delete_collection(&collection.id) {
            Ok(()) => removed.push(collection.id.clone()),
            Err(err) => tracing::warn!(
                collection_id = %collection.id,
                error = %err,
                "failed to delete collection"
            ),
        }
    }
    Ok(removed)
}
