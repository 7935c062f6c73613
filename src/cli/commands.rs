use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{resolve_config, GeneratorConfig, PatchMode};
use crate::error::GenerateError;
use crate::generator::{
    generate_entity, inspect_entity, install_templates, print_summary, GenerateOptions,
    InstallStatus,
};

/// Command-line interface for crudgen
///
/// Generates a CRUD scaffold for one entity of a Prisma schema and registers it
/// in the project's shared files.
#[derive(Parser, Debug)]
#[command(name = "crudgen", version)]
#[command(about = "Schema-driven CRUD scaffold generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the scaffold for one entity and register it
    Generate {
        /// Entity (model) name as declared in the schema; prompted for when omitted
        #[arg(short, long)]
        entity: Option<String>,

        /// Permission name used by the generated routes; prompted for when omitted
        #[arg(short, long)]
        permission: Option<String>,

        /// Project root; all configured paths are relative to it
        #[arg(long, env = "CRUDGEN_ROOT", default_value = ".")]
        root: PathBuf,

        /// Path to a crudgen.toml (default: <root>/crudgen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Record the entity in the registry manifest instead of splicing shared files
        #[arg(long, default_value_t = false)]
        registry: bool,

        /// Perform a dry run: show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print extracted fields, mapped types and synthesized rules as JSON
    Inspect {
        /// Entity (model) name as declared in the schema
        #[arg(short, long)]
        entity: String,

        #[arg(long, env = "CRUDGEN_ROOT", default_value = ".")]
        root: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Install the bundled scaffold templates into the template directory
    Templates {
        #[arg(long, env = "CRUDGEN_ROOT", default_value = ".")]
        root: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite templates that already exist
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
}

/// Ask for a value until a non-blank line is entered
///
/// # Errors
///
/// Fails when input ends before a value was given.
pub fn prompt_non_empty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    what: &str,
) -> anyhow::Result<String> {
    loop {
        write!(output, "{message} ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(GenerateError::EmptyInput {
                what: what.to_string(),
            }
            .into());
        }
        let value = line.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
        writeln!(output, "{what} is required")?;
    }
}

fn load_config(explicit: Option<&Path>, root: &Path) -> anyhow::Result<GeneratorConfig> {
    let config = resolve_config(explicit, root)?;
    tracing::debug!(patch_mode = ?config.patch_mode, schema = %config.schema_path.display(), "resolved configuration");
    Ok(config)
}

/// Run a parsed command, prompting on stdin when inputs are missing
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_cli_with_io(cli, &mut stdin.lock(), &mut stdout.lock())
}

/// [`run_cli`] with explicit prompt streams
pub fn run_cli_with_io<R: BufRead, W: Write>(
    cli: Cli,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            entity,
            permission,
            root,
            config,
            registry,
            dry_run,
        } => {
            let mut config = load_config(config.as_deref(), &root)?;
            if registry {
                config.patch_mode = PatchMode::Registry;
            }
            let entity = match entity {
                Some(e) => e,
                None => prompt_non_empty(input, output, "Enter the model name:", "Model name")?,
            };
            let permission = match permission {
                Some(p) => p,
                None => prompt_non_empty(
                    input,
                    output,
                    "Enter the permission name:",
                    "Permission name",
                )?,
            };
            let report = generate_entity(&GenerateOptions {
                root,
                entity: entity.clone(),
                permission,
                config,
                dry_run,
            })
            .with_context(|| format!("Failed to generate scaffold for {entity}"))?;
            print_summary(&report);
            Ok(())
        }
        Commands::Inspect {
            entity,
            root,
            config,
        } => {
            let config = load_config(config.as_deref(), &root)?;
            let inspection = inspect_entity(&root, &config, &entity)
                .with_context(|| format!("Failed to inspect {entity}"))?;
            writeln!(output, "{}", serde_json::to_string_pretty(&inspection)?)?;
            Ok(())
        }
        Commands::Templates {
            root,
            config,
            force,
        } => {
            let config = load_config(config.as_deref(), &root)?;
            let dir = root.join(&config.template_dir);
            let installed = install_templates(&dir, force)?;
            let written = installed
                .iter()
                .filter(|(_, status)| *status == InstallStatus::Written)
                .count();
            tracing::info!(dir = %dir.display(), written, skipped = installed.len() - written, "templates installed");
            Ok(())
        }
    }
}
