//! End-to-end onboarding of local spec documents into a Postman workspace.
//!
//! Each document runs through publish, generate, attach, export, environments
//! and cleanup in that order. The first fatal error aborts the run; re-running
//! with the same inputs converges on the same workspace state.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::app::AppContext;
use crate::app::commands::{attach, cleanup, environments, export, generate, publish};
use crate::app::commands::cleanup::CollectionInventory;
use crate::app::commands::environments::EnsuredEnvironment;
use crate::domain::{AppError, RemoteRef, SpecDocument, jwt_prerequest_lines};
use crate::ports::{PostmanApi, SpecSource};

/// Inputs of an onboarding run.
#[derive(Debug, Clone, Default)]
pub struct OnboardOptions {
    /// Spec file, or directory scanned for YAML documents.
    pub spec_path: PathBuf,
    /// Display name override; only valid when exactly one document is found.
    pub spec_name: Option<String>,
    /// Directory receiving `collection-<id>.json` exports.
    pub output_dir: Option<PathBuf>,
}

/// What happened to one spec document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutcome {
    pub name: String,
    pub spec_id: String,
    pub collection_id: String,
    pub environments: Vec<EnsuredEnvironment>,
    pub removed_collections: Vec<String>,
    pub export_path: Option<PathBuf>,
}

/// Summary of an onboarding run.
#[derive(Debug, Clone)]
pub struct OnboardReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub specs: Vec<SpecOutcome>,
}

pub fn execute<C: PostmanApi, S: SpecSource>(
    ctx: &AppContext<C>,
    source: &S,
    options: &OnboardOptions,
) -> Result<OnboardReport, AppError> {
    let started_at = Utc::now();
    let documents = named_documents(source.discover(&options.spec_path)?, options)?;
    tracing::info!(
        count = documents.len(),
        path = %options.spec_path.display(),
        "onboarding spec documents"
    );

    let mut inventory = CollectionInventory::snapshot(ctx)?;
    let script = jwt_prerequest_lines(&ctx.config().script)?;

    let mut specs = Vec::with_capacity(documents.len());
    for document in &documents {
        let outcome = onboard_document(ctx, &inventory, document, &script, options)?;
        // Same-named documents later in the run must replace this collection.
        inventory.record(
            RemoteRef::new(&outcome.collection_id, document.collection_name()),
            &outcome.removed_collections,
        );
        specs.push(outcome);
    }

    Ok(OnboardReport { started_at, finished_at: Utc::now(), specs })
}

fn named_documents(
    documents: Vec<SpecDocument>,
    options: &OnboardOptions,
) -> Result<Vec<SpecDocument>, AppError> {
    let Some(name) = options.spec_name.as_deref() else {
        return Ok(documents);
    };
    if documents.len() != 1 {
        return Err(AppError::config_error(format!(
            "--spec-name applies to a single spec, but {} were found under {}",
            documents.len(),
            options.spec_path.display()
        )));
    }
    Ok(documents.into_iter().map(|document| document.with_name(name)).collect())
}

fn onboard_document<C: PostmanApi>(
    ctx: &AppContext<C>,
    inventory: &CollectionInventory,
    document: &SpecDocument,
    script: &[String],
    options: &OnboardOptions,
) -> Result<SpecOutcome, AppError> {
    let name = document.name.as_str();
    let collection_name = document.collection_name();
    tracing::info!(name, path = %document.path.display(), "onboarding spec");

    let spec_id = publish::execute(ctx, name, document)?;
    let collection_id = generate::execute(ctx, &spec_id, &collection_name)?;
    attach::execute(ctx, &collection_id, script.to_vec())?;

    let export_path = match &options.output_dir {
        Some(dir) => Some(export::execute(ctx, &collection_id, dir)?),
        None => None,
    };
    let environments = environments::ensure_all(ctx, name)?;
    let removed_collections = cleanup::execute(ctx, inventory, &collection_name, &collection_id)?;

    Ok(SpecOutcome {
        name: name.to_string(),
        spec_id,
        collection_id,
        environments,
        removed_collections,
        export_path,
    })
}
