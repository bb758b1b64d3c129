//! specboard: Onboard OpenAPI specs into Postman workspaces.
//!
//! A run publishes each local spec, generates a collection from it, attaches a
//! JWT pre-request script, syncs per-deployment environments, and removes the
//! collections the new generation superseded.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    EnsuredEnvironment, OnboardOptions, OnboardReport, SpecOutcome, ensure_environments,
    export_collection, list_specs, load_config, onboard,
};
pub use domain::{AppError, ConfigOverrides, SpecDocument};
