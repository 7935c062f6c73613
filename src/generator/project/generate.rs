use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{GeneratorConfig, PatchMode};
use crate::error::{GenerateError, Warning};
use crate::generator::docs::{doc_definition, doc_definition_json};
use crate::generator::naming::EntityNames;
use crate::generator::templates::{
    write_artifact, ArtifactKind, GenerationInputs, TemplateContext, TemplateEngine,
};
use crate::generator::test_data::{synthesize_test_data, TestDataSet};
use crate::generator::validation::{synthesize_rules, ValidationRuleSet};
use crate::patch::{self, PatchResult, PatchTarget};
use crate::schema::{extract, read_schema, ModelDefinition};

/// Inputs of one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Project root; every configured path is relative to it
    pub root: PathBuf,
    pub entity: String,
    pub permission: String,
    pub config: GeneratorConfig,
    /// Render and plan everything but write nothing
    pub dry_run: bool,
}

/// One rendered artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    /// Absolute output path
    pub path: PathBuf,
    pub content: String,
}

/// Outcome for one shared file, or for the manifest in registry mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub name: String,
    pub path: PathBuf,
    pub result: PatchResult,
}

/// Everything a run did, for the summary and for callers that assert on it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub entity: String,
    pub dry_run: bool,
    pub artifacts: Vec<(ArtifactKind, PathBuf)>,
    pub patches: Vec<PatchOutcome>,
    /// Registry sub-files rewritten in registry mode
    pub registry_files: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

fn require(value: &str, what: &str) -> Result<(), GenerateError> {
    if value.trim().is_empty() {
        return Err(GenerateError::EmptyInput {
            what: what.to_string(),
        });
    }
    Ok(())
}

/// Read the configured schema and extract one entity
pub fn load_model(
    root: &Path,
    config: &GeneratorConfig,
    entity: &str,
) -> Result<(ModelDefinition, Vec<Warning>), GenerateError> {
    require(entity, "Model name")?;
    let schema_path = root.join(&config.schema_path);
    let schema = read_schema(&schema_path)?;
    extract(&schema, entity.trim())
}

/// Synthesize rules, test data and the doc definition for a model
pub fn build_inputs(model: &ModelDefinition, permission: &str) -> GenerationInputs {
    let names = EntityNames::new(&model.entity_name);
    let rules = synthesize_rules(&names, &model.fields);
    let test_data = synthesize_test_data(&model.fields);
    GenerationInputs::new(model, permission, rules, test_data, doc_definition_json(model))
}

/// Render every artifact kind in generation order without writing anything
pub fn render_artifacts(
    root: &Path,
    config: &GeneratorConfig,
    inputs: &GenerationInputs,
) -> Result<Vec<RenderedArtifact>, GenerateError> {
    let engine = TemplateEngine::new(root.join(&config.template_dir));
    ArtifactKind::ALL
        .iter()
        .map(|&kind| {
            let content = engine.render(kind, &inputs.context_for(kind))?;
            Ok(RenderedArtifact {
                kind,
                path: root.join(kind.output_path(&config.paths, &inputs.names)),
                content,
            })
        })
        .collect()
}

/// Generate the scaffold for one entity and register it in the shared files
///
/// The schema is read and the entity extracted before anything is written, so an
/// unknown entity leaves the project untouched. After that the run stops at the
/// first error and keeps whatever it already wrote.
pub fn generate_entity(options: &GenerateOptions) -> Result<GenerationReport, GenerateError> {
    require(&options.permission, "Permission name")?;
    let root = &options.root;
    let config = &options.config;

    let (model, mut warnings) = load_model(root, config, &options.entity)?;
    tracing::info!(
        entity = %model.entity_name,
        fields = model.generated_fields().count(),
        "extracted model"
    );

    let inputs = build_inputs(&model, options.permission.trim());
    let rendered = render_artifacts(root, config, &inputs)?;

    let mut report = GenerationReport {
        entity: model.entity_name.clone(),
        dry_run: options.dry_run,
        ..GenerationReport::default()
    };

    for artifact in rendered {
        if !options.dry_run {
            write_artifact(&artifact.path, &artifact.content)?;
            tracing::info!(artifact = artifact.kind.label(), path = %artifact.path.display(), "wrote artifact");
        }
        report.artifacts.push((artifact.kind, artifact.path));
    }

    match config.patch_mode {
        PatchMode::Anchors => {
            let ctx = TemplateContext::for_entity(&inputs.names, &inputs.permission);
            for shared in &config.shared {
                let target = PatchTarget::from_config(shared, root, &ctx);
                let result = if options.dry_run {
                    let content = fs::read_to_string(&target.file_path).map_err(|source| {
                        GenerateError::SharedFile {
                            path: target.file_path.clone(),
                            source,
                        }
                    })?;
                    patch::plan_patch(&content, &target).1
                } else {
                    patch::patch(&target, &model.entity_name)?
                };
                warnings.extend(result.warnings.iter().cloned());
                report.patches.push(PatchOutcome {
                    name: target.name,
                    path: target.file_path,
                    result,
                });
            }
        }
        PatchMode::Registry => {
            let outcome =
                patch::sync_registry(root, &config.registry, &inputs.names, options.dry_run)?;
            report.patches.push(PatchOutcome {
                name: "registry".to_string(),
                path: root.join(&config.registry.manifest),
                result: PatchResult {
                    applied: outcome.added,
                    inserted: usize::from(outcome.added),
                    warnings: Vec::new(),
                },
            });
            report.registry_files = outcome
                .changed_files
                .into_iter()
                .map(|p| root.join(p))
                .collect();
        }
    }

    report.warnings = warnings;
    Ok(report)
}

/// Machine-readable view of one entity, printed by `crudgen inspect`
#[derive(Debug, Clone, Serialize)]
pub struct EntityInspection {
    pub entity: String,
    pub fields: Vec<InspectedField>,
    pub rules: ValidationRuleSet,
    pub test_data: TestDataSet,
    pub doc_definition: serde_json::Value,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectedField {
    pub name: String,
    pub raw_type: String,
    pub output_type: String,
    pub doc_type: String,
    pub optional: bool,
    pub array: bool,
    pub unique: bool,
    pub system: bool,
}

/// Extract and synthesize without rendering or writing
pub fn inspect_entity(
    root: &Path,
    config: &GeneratorConfig,
    entity: &str,
) -> Result<EntityInspection, GenerateError> {
    let (model, warnings) = load_model(root, config, entity)?;
    let names = EntityNames::new(&model.entity_name);
    let fields = model
        .fields
        .iter()
        .map(|f| InspectedField {
            name: f.name.clone(),
            raw_type: f.raw_type.clone(),
            output_type: f.output_type(),
            doc_type: f.doc_type(),
            optional: f.is_optional,
            array: f.is_array,
            unique: f.is_unique,
            system: f.is_system(),
        })
        .collect();
    Ok(EntityInspection {
        entity: model.entity_name.clone(),
        fields,
        rules: synthesize_rules(&names, &model.fields),
        test_data: synthesize_test_data(&model.fields),
        doc_definition: doc_definition(&model),
        warnings,
    })
}

/// Print the human-readable run summary on stdout
pub fn print_summary(report: &GenerationReport) {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    println!("📦 {} scaffold for {}", verb, report.entity);
    for (kind, path) in &report.artifacts {
        println!("  ✅ {:<22} {}", kind.label(), path.display());
    }
    for outcome in &report.patches {
        let result = &outcome.result;
        let status = if !result.applied && result.warnings.is_empty() {
            "already present".to_string()
        } else if !result.applied {
            format!("nothing inserted, {} anchor(s) skipped", result.warnings.len())
        } else if result.warnings.is_empty() {
            format!("{} insertion(s)", result.inserted)
        } else {
            format!(
                "{} insertion(s), {} anchor(s) skipped",
                result.inserted,
                result.warnings.len()
            )
        };
        println!("  🔗 {:<22} {} ({})", outcome.name, outcome.path.display(), status);
    }
    for path in &report.registry_files {
        println!("  🔁 {:<22} {}", "registry file", path.display());
    }
    for warning in &report.warnings {
        println!("  ⚠️  {warning}");
    }
    if report.dry_run {
        println!("ℹ️  Dry run: nothing was written");
    }
}
