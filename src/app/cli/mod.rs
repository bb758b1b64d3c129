//! CLI Adapter.

mod onboard;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, ConfigOverrides};

#[derive(Parser)]
#[command(name = "specboard")]
#[command(version)]
#[command(
    about = "Onboard OpenAPI specs into Postman with generated collections and environments",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Postman API key (overrides POSTMAN_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Target workspace id (overrides POSTMAN_WORKSPACE_ID)
    #[arg(long, global = true)]
    workspace_id: Option<String>,
    /// Postman API base URL (overrides POSTMAN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Path to specboard.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Env file to load instead of .env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            workspace_id: self.workspace_id.clone(),
            api_url: self.api_url.clone(),
            config_path: self.config.clone(),
            env_file: self.env_file.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Publish specs, generate collections, attach auth, and sync environments
    #[clap(visible_alias = "o")]
    Onboard {
        /// Single spec file to onboard
        #[arg(long, conflicts_with = "spec_dir")]
        spec_file: Option<PathBuf>,
        /// Directory scanned for *.yaml / *.yml specs (default: SPEC_PATH or ./specs)
        #[arg(long, conflicts_with = "spec_file")]
        spec_dir: Option<PathBuf>,
        /// Display name override for a single spec
        #[arg(long)]
        spec_name: Option<String>,
        /// Export each final collection as JSON into this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// List local spec documents and their derived names
    #[clap(visible_alias = "ls")]
    Specs {
        /// Spec file or directory (default: SPEC_PATH or ./specs)
        path: Option<PathBuf>,
    },
    /// Write a collection to disk as JSON
    Export {
        /// Collection id
        #[arg(long)]
        collection_id: String,
        /// Destination directory
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Create or refresh the configured environments for a spec name
    #[clap(visible_alias = "env")]
    Environments {
        /// Spec display name the environments are named after
        #[arg(long)]
        name: String,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    let overrides = cli.global.overrides();

    let result: Result<(), AppError> = match cli.command {
        Commands::Onboard { spec_file, spec_dir, spec_name, output_dir } => {
            onboard::run_onboard(&overrides, spec_file, spec_dir, spec_name, output_dir)
        }
        Commands::Specs { path } => run_specs(&overrides, path),
        Commands::Export { collection_id, output_dir } => {
            run_export(&overrides, &collection_id, output_dir)
        }
        Commands::Environments { name } => run_environments(&overrides, &name),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "specboard=debug" } else { "specboard=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_specs(overrides: &ConfigOverrides, path: Option<PathBuf>) -> Result<(), AppError> {
    crate::domain::configuration::load_env_file(overrides.env_file.as_deref())?;
    let path = crate::domain::configuration::resolve_spec_path(path);
    let documents = crate::app::api::list_specs(&path)?;

    println!("✅ Found {} spec(s) under {}", documents.len(), path.display());
    for document in &documents {
        println!(
            "  • {} ({}, {})",
            document.name,
            document.path.display(),
            document.content_type.as_str()
        );
    }
    Ok(())
}

fn run_export(
    overrides: &ConfigOverrides,
    collection_id: &str,
    output_dir: PathBuf,
) -> Result<(), AppError> {
    let path = crate::app::api::export_collection(overrides, collection_id, &output_dir)?;
    println!("✅ Exported collection {} to {}", collection_id, path.display());
    Ok(())
}

fn run_environments(overrides: &ConfigOverrides, name: &str) -> Result<(), AppError> {
    let ensured = crate::app::api::ensure_environments(overrides, name)?;
    for environment in &ensured {
        let action = if environment.created { "Created" } else { "Updated" };
        println!("✅ {} environment '{}' ({})", action, environment.name, environment.id);
    }
    Ok(())
}
