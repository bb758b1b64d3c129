//! Environment upsert keyed on exact display name.

use crate::app::AppContext;
use crate::domain::{AppError, Environment, extract_id};
use crate::ports::PostmanApi;

/// Outcome of ensuring one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredEnvironment {
    pub name: String,
    pub id: String,
    pub created: bool,
}

/// Create `environment`, or fully replace the variables of the same-named one.
///
/// Surplus environments sharing the name are deleted; their delete results are ignored.
pub fn ensure<C: PostmanApi>(
    ctx: &AppContext<C>,
    environment: &Environment,
) -> Result<EnsuredEnvironment, AppError> {
    let client = ctx.client();
    let workspace_id = ctx.workspace_id();
    let mut matching = client
        .list_environments(workspace_id)?
        .into_iter()
        .filter(|existing| existing.name == environment.name);

    if let Some(existing) = matching.next() {
        tracing::info!(
            name = %environment.name,
            environment_id = %existing.id,
            "updating environment"
        );
        client.update_environment(&existing.id, environment)?;

        for duplicate in matching {
            tracing::info!(environment_id = %duplicate.id, "deleting duplicate environment");
            if let Err(err) = client.delete_environment(&duplicate.id) {
                tracing::warn!(
                    environment_id = %duplicate.id,
                    error = %err,
                    "failed to delete duplicate environment"
                );
            }
        }
        return Ok(EnsuredEnvironment {
            name: environment.name.clone(),
            id: existing.id,
            created: false,
        });
    }

    tracing::info!(name = %environment.name, workspace_id, "creating environment");
    let response = client.create_environment(workspace_id, environment)?;
    let id = extract_id(&response, "environment").ok_or_else(|| AppError::MissingIdentifier {
        what: "environment",
        response: response.to_string(),
    })?;
    Ok(EnsuredEnvironment { name: environment.name.clone(), id, created: true })
}

/// Ensure every configured deployment environment for `spec_name`.
pub fn ensure_all<C: PostmanApi>(
    ctx: &AppContext<C>,
    spec_name: &str,
) -> Result<Vec<EnsuredEnvironment>, AppError> {
    ctx.config()
        .environments
        .iter()
        .map(|target| ensure(ctx, &Environment::for_target(spec_name, target)))
        .collect()
}
