use std::path::PathBuf;

use crate::app::api::{OnboardOptions, OnboardReport};
use crate::domain::configuration::resolve_spec_path;
use crate::domain::{AppError, ConfigOverrides};

pub fn run_onboard(
    overrides: &ConfigOverrides,
    spec_file: Option<PathBuf>,
    spec_dir: Option<PathBuf>,
    spec_name: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    if let Some(file) = spec_file.as_deref().filter(|file| !file.is_file()) {
        return Err(AppError::config_error(format!(
            "--spec-file must name an existing file: {}",
            file.display()
        )));
    }
    // Load the env file first so SPEC_PATH from it is honoured.
    crate::domain::configuration::load_env_file(overrides.env_file.as_deref())?;
    let spec_path = resolve_spec_path(spec_file.or(spec_dir));
    let options = OnboardOptions { spec_path, spec_name, output_dir };

    let report = crate::app::api::onboard(overrides, &options)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &OnboardReport) {
    for spec in &report.specs {
        println!("✅ Onboarded {} (spec {})", spec.name, spec.spec_id);
        println!("  Collection: {} Collection ({})", spec.name, spec.collection_id);
        for environment in &spec.environments {
            let action = if environment.created { "created" } else { "updated" };
            println!("  Environment: {} ({}, {})", environment.name, environment.id, action);
        }
        if !spec.removed_collections.is_empty() {
            println!("  Removed {} stale collection(s)", spec.removed_collections.len());
        }
        if let Some(path) = &spec.export_path {
            println!("  Exported to {}", path.display());
        }
    }

    let elapsed = report.finished_at - report.started_at;
    println!(
        "✅ Onboarded {} spec(s) in {:.1}s",
        report.specs.len(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );
}
