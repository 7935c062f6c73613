//! Generator configuration
//!
//! A project can place a `crudgen.toml` at its root to relocate the schema, the
//! template directory, the output directories, or to replace the catalog of shared
//! files that get patched. Every key is optional; missing keys keep the defaults of
//! an Express + Prisma + Inversify layout.
//!
//! ```toml
//! schema_path = "prisma/schema.prisma"
//! patch_mode = "registry"
//!
//! [paths]
//! models = "src/domain/models"
//!
//! [[shared]]
//! name = "route aggregator"
//! path = "src/routes/index.ts"
//! markers = ["${modelName}Routes"]
//! anchors = [
//!   { anchor = "export default router;", snippet = "router.use('/${pluralModelName}', ${ModelName}Routes);\n" },
//! ]
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "crudgen.toml";

/// How shared registries are updated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchMode {
    /// Splice snippets before anchor lines in hand-maintained files
    #[default]
    Anchors,
    /// Maintain a manifest and regenerate include-once registration files
    Registry,
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Schema-definition file, relative to the project root
    pub schema_path: PathBuf,
    /// Directory holding the scaffold templates
    pub template_dir: PathBuf,
    pub patch_mode: PatchMode,
    pub paths: OutputPaths,
    pub registry: RegistryPaths,
    /// Shared files patched in anchor mode, in order
    pub shared: Vec<SharedFileConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            schema_path: PathBuf::from("db/prisma/schema.prisma"),
            template_dir: PathBuf::from("src/config/templates"),
            patch_mode: PatchMode::default(),
            paths: OutputPaths::default(),
            registry: RegistryPaths::default(),
            shared: default_shared_catalog(),
        }
    }
}

/// Per-artifact output directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub models: PathBuf,
    pub controllers: PathBuf,
    pub services: PathBuf,
    pub routes: PathBuf,
    pub validators: PathBuf,
    pub swagger_paths: PathBuf,
    pub swagger_definitions: PathBuf,
    pub unit_tests: PathBuf,
    pub integration_tests: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths {
            models: "src/models".into(),
            controllers: "src/controllers".into(),
            services: "src/services".into(),
            routes: "src/routes".into(),
            validators: "src/validators".into(),
            swagger_paths: "src/config/swagger/paths".into(),
            swagger_definitions: "src/config/swagger/definitions".into(),
            unit_tests: "src/tests/unit".into(),
            integration_tests: "src/tests/integration".into(),
        }
    }
}

/// Locations used in registry mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryPaths {
    /// JSON manifest of registered entities
    pub manifest: PathBuf,
    /// Generated dependency-injection bindings
    pub container: PathBuf,
    /// Generated route table
    pub routes: PathBuf,
    /// Generated API-doc aggregate
    pub docs: PathBuf,
}

impl Default for RegistryPaths {
    fn default() -> Self {
        RegistryPaths {
            manifest: "src/config/generated/registry.json".into(),
            container: "src/config/generated/containerBindings.ts".into(),
            routes: "src/routes/generated/generatedRoutes.ts".into(),
            docs: "src/config/swagger/generated/generatedDocs.ts".into(),
        }
    }
}

/// One shared file of the patch catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFileConfig {
    /// Human-readable name used in logs and the summary
    pub name: String,
    pub path: PathBuf,
    /// The entity counts as registered when all markers are present
    pub markers: Vec<String>,
    /// Insertions, applied in order
    pub anchors: Vec<AnchorConfig>,
}

/// Snippet inserted immediately before the first occurrence of `anchor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConfig {
    pub anchor: String,
    pub snippet: String,
}

fn anchor(anchor: &str, snippet: &str) -> AnchorConfig {
    AnchorConfig {
        anchor: anchor.to_string(),
        snippet: snippet.to_string(),
    }
}

/// Dependency registry, route aggregator and API-doc aggregator
pub fn default_shared_catalog() -> Vec<SharedFileConfig> {
    vec![
        SharedFileConfig {
            name: "dependency registry".into(),
            path: "src/config/inversifyConfig.ts".into(),
            markers: vec!["${ModelName}Controller".into(), "${ModelName}Service".into()],
            anchors: vec![
                anchor(
                    "const container = new Container();",
                    "import { ${ModelName}Controller } from '../controllers/${modelName}Controller';\nimport { ${ModelName}Service } from '../services/${modelName}Service';\n\n",
                ),
                anchor(
                    "export default container;",
                    "container.bind<${ModelName}Controller>(${ModelName}Controller).toSelf();\ncontainer.bind<${ModelName}Service>(${ModelName}Service).toSelf();\n\n",
                ),
            ],
        },
        SharedFileConfig {
            name: "route aggregator".into(),
            path: "src/routes/v1.ts".into(),
            markers: vec!["${modelName}Routes".into()],
            anchors: vec![
                anchor(
                    "const router = Router();",
                    "import ${ModelName}Routes from './${modelName}Routes';\n",
                ),
                anchor(
                    "export default router;",
                    "router.use('/api/v1/${pluralModelName}', authMiddleware, ${ModelName}Routes);\n\n",
                ),
            ],
        },
        SharedFileConfig {
            name: "doc aggregator".into(),
            path: "src/config/swagger/swaggerConfig.ts".into(),
            markers: vec!["${modelName}Paths".into()],
            anchors: vec![
                anchor(
                    "// Path Imports ends",
                    "import ${modelName}Paths from './paths/${modelName}Paths';\n",
                ),
                anchor(
                    "// Definition Imports ends",
                    "import ${modelName}Definitions from './definitions/${modelName}Definition';\n",
                ),
                anchor(
                    "// register new paths here",
                    "...${modelName}Paths,\n        ",
                ),
                anchor(
                    "// register new defintions here",
                    "...${modelName}Definitions,\n        ",
                ),
            ],
        },
    ]
}

/// Load a configuration file
///
/// Returns `Ok(None)` when the file does not exist and an error when it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// `crudgen.toml` inside the project root, whether or not it exists
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Resolve which configuration to use
///
/// Priority:
/// 1. Explicitly provided path (must exist)
/// 2. `crudgen.toml` in the project root
/// 3. Built-in defaults
pub fn resolve_config(explicit_path: Option<&Path>, root: &Path) -> anyhow::Result<GeneratorConfig> {
    if let Some(path) = explicit_path {
        return load_config(path)?
            .with_context(|| format!("Config file not found: {}", path.display()));
    }
    Ok(load_config(&default_config_path(root))?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(None, dir.path()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.shared.len(), 3);
        assert_eq!(config.patch_mode, PatchMode::Anchors);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "schema_path = \"prisma/schema.prisma\"\npatch_mode = \"registry\"\n\n[paths]\nmodels = \"src/domain\"\n",
        )
        .unwrap();
        let config = resolve_config(None, dir.path()).unwrap();
        assert_eq!(config.schema_path, PathBuf::from("prisma/schema.prisma"));
        assert_eq!(config.patch_mode, PatchMode::Registry);
        assert_eq!(config.paths.models, PathBuf::from("src/domain"));
        assert_eq!(config.paths.services, PathBuf::from("src/services"));
        assert_eq!(config.shared, default_shared_catalog());
    }

    #[test]
    fn test_custom_catalog_replaces_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[[shared]]
name = "routes"
path = "src/routes/index.ts"
markers = ["${modelName}Routes"]
anchors = [{ anchor = "export default router;", snippet = "x\n" }]
"#,
        )
        .unwrap();
        let config = resolve_config(Some(&path), dir.path()).unwrap();
        assert_eq!(config.shared.len(), 1);
        assert_eq!(config.shared[0].anchors[0].anchor, "export default router;");
    }

    #[test]
    fn test_invalid_or_missing_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), dir.path()).is_err());

        let bad = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&bad, "patch_mode = 7").unwrap();
        let err = resolve_config(None, dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
