//! Collection generation and polling.
//!
//! Postman generates collections asynchronously: the initiating call returns a task
//! reference before the collection is listable, so the listing is polled with a fixed
//! delay until the collection appears or the attempt budget runs out.

use serde_json::Value;

use crate::app::AppContext;
use crate::domain::{AppError, RemoteRef};
use crate::ports::{GenerationRequest, PostmanApi};

/// Generate a collection named `name` from `spec_id` and return its id.
pub fn execute<C: PostmanApi>(
    ctx: &AppContext<C>,
    spec_id: &str,
    name: &str,
) -> Result<String, AppError> {
    let response = request(ctx, spec_id, name)?;
    match poll(ctx, spec_id, name)? {
        Some(collection_id) => Ok(collection_id),
        None => Err(AppError::GenerationTimeout {
            spec_id: spec_id.to_string(),
            attempts: ctx.config().generation.poll_attempts,
            response: response.to_string(),
        }),
    }
}

/// Ask Postman to generate a collection; returns the raw generation response.
pub fn request<C: PostmanApi>(
    ctx: &AppContext<C>,
    spec_id: &str,
    name: &str,
) -> Result<Value, AppError> {
    tracing::info!(spec_id, name, "requesting collection generation");
    ctx.client().generate_collection(spec_id, &GenerationRequest::named(name))
}

/// Poll the generated-collections listing for `spec_id`.
///
/// Returns `None` when nothing appears within the configured attempts. A failed
/// listing ends polling with that error.
pub fn poll<C: PostmanApi>(
    ctx: &AppContext<C>,
    spec_id: &str,
    name: &str,
) -> Result<Option<String>, AppError> {
    let generation = &ctx.config().generation;
    let attempts = generation.poll_attempts.max(1);

    for attempt in 1..=attempts {
        // The transport already retries throttling and server errors.
        let collections = ctx.client().list_generated_collections(spec_id)?;
        if let Some(found) = select_collection(&collections, name) {
            tracing::info!(collection_id = %found.id, attempt, "generated collection ready");
            return Ok(Some(found.id.clone()));
        }
        tracing::debug!(attempt, attempts, "generated collection not listed yet");
        if attempt < attempts {
            std::thread::sleep(generation.poll_delay());
        }
    }

    tracing::warn!(spec_id, attempts, "generated collection never appeared");
    Ok(None)
}

/// Exact name match first, otherwise the first listed collection.
pub fn select_collection<'a>(collections: &'a [RemoteRef], name: &str) -> Option<&'a RemoteRef> {
    collections.iter().find(|c| c.name == name).or_else(|| collections.first())
}
