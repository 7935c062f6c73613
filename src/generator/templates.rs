use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::naming::EntityNames;
use super::test_data::TestDataSet;
use super::validation::ValidationRuleSet;
use crate::config::OutputPaths;
use crate::error::GenerateError;
use crate::schema::ModelDefinition;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z][A-Za-z0-9_]*)\}").expect("valid placeholder pattern")
});

/// Template used for the model when the template directory has no `model.ts`
pub const DEFAULT_MODEL_TEMPLATE: &str = "export interface ${ModelName} {\n    ${modelFields}\n}\n";

/// Every file produced for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    Model,
    Controller,
    Service,
    Routes,
    Validator,
    DocPaths,
    DocDefinition,
    ControllerTest,
    ServiceTest,
    IntegrationTest,
}

impl ArtifactKind {
    /// Generation order
    pub const ALL: [ArtifactKind; 10] = [
        ArtifactKind::Model,
        ArtifactKind::Controller,
        ArtifactKind::Service,
        ArtifactKind::Routes,
        ArtifactKind::Validator,
        ArtifactKind::DocPaths,
        ArtifactKind::DocDefinition,
        ArtifactKind::ControllerTest,
        ArtifactKind::ServiceTest,
        ArtifactKind::IntegrationTest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Model => "Model",
            ArtifactKind::Controller => "Controller",
            ArtifactKind::Service => "Service",
            ArtifactKind::Routes => "Routes",
            ArtifactKind::Validator => "Validator",
            ArtifactKind::DocPaths => "Swagger Paths",
            ArtifactKind::DocDefinition => "Swagger Definition",
            ArtifactKind::ControllerTest => "Controller Unit Tests",
            ArtifactKind::ServiceTest => "Service Unit Tests",
            ArtifactKind::IntegrationTest => "Integration Tests",
        }
    }

    /// Template file name inside the template directory
    pub fn template_file(self) -> &'static str {
        match self {
            ArtifactKind::Model => "model.ts",
            ArtifactKind::Controller => "controller.ts",
            ArtifactKind::Service => "service.ts",
            ArtifactKind::Routes => "routes.ts",
            ArtifactKind::Validator => "validator.ts",
            ArtifactKind::DocPaths => "swaggerPaths.ts",
            ArtifactKind::DocDefinition => "swaggerDefinition.ts",
            ArtifactKind::ControllerTest => "controller.test.ts",
            ArtifactKind::ServiceTest => "service.test.ts",
            ArtifactKind::IntegrationTest => "test.ts",
        }
    }

    /// Output path relative to the project root
    pub fn output_path(self, paths: &OutputPaths, names: &EntityNames) -> PathBuf {
        let lc = &names.lower_camel;
        match self {
            ArtifactKind::Model => paths.models.join(format!("{}.ts", names.entity)),
            ArtifactKind::Controller => paths.controllers.join(format!("{lc}Controller.ts")),
            ArtifactKind::Service => paths.services.join(format!("{lc}Service.ts")),
            ArtifactKind::Routes => paths.routes.join(format!("{lc}Routes.ts")),
            ArtifactKind::Validator => paths.validators.join(format!("{lc}Validator.ts")),
            ArtifactKind::DocPaths => paths.swagger_paths.join(format!("{lc}Paths.ts")),
            ArtifactKind::DocDefinition => {
                paths.swagger_definitions.join(format!("{lc}Definition.ts"))
            }
            ArtifactKind::ControllerTest => paths
                .unit_tests
                .join("controllers")
                .join(format!("{lc}Controller.test.ts")),
            ArtifactKind::ServiceTest => paths
                .unit_tests
                .join("services")
                .join(format!("{lc}Service.test.ts")),
            ArtifactKind::IntegrationTest => paths
                .integration_tests
                .join(format!("{lc}.integration.test.ts")),
        }
    }
}

/// Placeholder name → substitution text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Context holding only the entity name variants and the permission
    pub fn for_entity(names: &EntityNames, permission: &str) -> Self {
        let mut ctx = TemplateContext::default();
        ctx.insert("ModelName", &names.entity);
        ctx.insert("modelName", &names.lower_camel);
        ctx.insert("pluralModelName", &names.plural);
        ctx.insert("permission", permission);
        ctx
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Everything synthesized for one run, from which per-artifact contexts are cut
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    pub names: EntityNames,
    pub permission: String,
    pub rules: ValidationRuleSet,
    pub test_data: TestDataSet,
    pub doc_definition: String,
    pub model_fields: String,
}

impl GenerationInputs {
    pub fn new(
        model: &ModelDefinition,
        permission: &str,
        rules: ValidationRuleSet,
        test_data: TestDataSet,
        doc_definition: String,
    ) -> Self {
        GenerationInputs {
            names: EntityNames::new(&model.entity_name),
            permission: permission.to_string(),
            rules,
            test_data,
            doc_definition,
            model_fields: model_fields(model),
        }
    }

    /// Context for a single artifact
    pub fn context_for(&self, kind: ArtifactKind) -> TemplateContext {
        let mut ctx = TemplateContext::for_entity(&self.names, &self.permission);
        let data = &self.test_data;
        match kind {
            ArtifactKind::Model => ctx.insert("modelFields", &self.model_fields),
            ArtifactKind::Validator => {
                ctx.insert("createValidation", &self.rules.create_block());
                ctx.insert("updateValidation", &self.rules.update_block());
            }
            ArtifactKind::DocDefinition => ctx.insert("swaggerDef", &self.doc_definition),
            ArtifactKind::ControllerTest | ArtifactKind::ServiceTest => {
                ctx.insert("testCreateData", &data.create_data);
                ctx.insert("testUpdateData", &data.update_data);
                ctx.insert("testPartialUpdateData", &data.partial_update_data);
                ctx.insert("testFilterParam", &data.filter_param);
            }
            ArtifactKind::IntegrationTest => {
                ctx.insert("testCreateData", &data.create_data);
                ctx.insert("testCreateExpectation", &data.create_expectation);
                ctx.insert("testUpdateData", &data.update_data);
                ctx.insert("testUpdateExpectation", &data.update_expectation);
                ctx.insert("testPartialUpdateData", &data.partial_update_data);
                ctx.insert("testInvalidData", &data.invalid_data);
                ctx.insert("testFilterParam", &data.filter_param);
            }
            ArtifactKind::Controller
            | ArtifactKind::Service
            | ArtifactKind::Routes
            | ArtifactKind::DocPaths => {}
        }
        ctx
    }
}

fn model_fields(model: &ModelDefinition) -> String {
    model
        .fields
        .iter()
        .map(|f| {
            let optional = if f.is_optional { "?" } else { "" };
            format!("{}{}: {};", f.name, optional, f.output_type())
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Replace every known `${name}` token in one pass
///
/// Substituted text is never rescanned, so the order in which placeholders are
/// defined cannot change the result. Unknown tokens (TypeScript template-literal
/// interpolation) are left as written.
pub fn substitute(template: &str, ctx: &TemplateContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match ctx.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Reads scaffold templates from a directory and fills them in
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    template_dir: PathBuf,
}

impl TemplateEngine {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        TemplateEngine {
            template_dir: template_dir.into(),
        }
    }

    /// Raw template text for an artifact kind
    ///
    /// Only the model has a built-in fallback; every other kind requires its file.
    pub fn load(&self, kind: ArtifactKind) -> Result<String, GenerateError> {
        let path = self.template_dir.join(kind.template_file());
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if kind == ArtifactKind::Model && e.kind() == io::ErrorKind::NotFound => {
                Ok(DEFAULT_MODEL_TEMPLATE.to_string())
            }
            Err(source) => Err(GenerateError::TemplateRead {
                kind: kind.label().to_string(),
                path,
                source,
            }),
        }
    }

    /// Render one artifact
    pub fn render(&self, kind: ArtifactKind, ctx: &TemplateContext) -> Result<String, GenerateError> {
        let template = self.load(kind)?;
        tracing::debug!(artifact = kind.label(), keys = ?ctx.keys().collect::<Vec<_>>(), "rendering template");
        Ok(substitute(&template, ctx))
    }
}

/// Write content, creating parent directories and replacing any existing file
pub fn write_artifact(path: &Path, content: &str) -> Result<(), GenerateError> {
    let to_error = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}
