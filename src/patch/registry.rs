//! Structured registration mode
//!
//! Instead of splicing snippets into hand-maintained files, every generated
//! entity is recorded in a JSON manifest and three include-once files are
//! regenerated from it. Re-running for a known entity leaves every file
//! byte-identical.

use askama::Template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::RegistryPaths;
use crate::error::GenerateError;
use crate::generator::EntityNames;

/// One registered entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub entity: String,
    pub lower_camel: String,
    pub plural: String,
}

impl From<&EntityNames> for RegistrationRecord {
    fn from(names: &EntityNames) -> Self {
        RegistrationRecord {
            entity: names.entity.clone(),
            lower_camel: names.lower_camel.clone(),
            plural: names.plural.clone(),
        }
    }
}

/// Manifest of every entity registered so far, keyed by entity name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub entities: BTreeMap<String, RegistrationRecord>,
}

#[derive(Template)]
#[template(path = "container_bindings.ts.txt", escape = "none")]
struct ContainerBindingsTemplate<'a> {
    entries: Vec<&'a RegistrationRecord>,
}

#[derive(Template)]
#[template(path = "generated_routes.ts.txt", escape = "none")]
struct GeneratedRoutesTemplate<'a> {
    entries: Vec<&'a RegistrationRecord>,
}

#[derive(Template)]
#[template(path = "generated_docs.ts.txt", escape = "none")]
struct GeneratedDocsTemplate<'a> {
    entries: Vec<&'a RegistrationRecord>,
}

impl Registry {
    /// Read the manifest, or start empty when it does not exist yet
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Registry::default()),
            Err(source) => {
                return Err(GenerateError::SharedFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|e| GenerateError::Registry {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Insert or replace a record; returns whether the manifest changed
    pub fn upsert(&mut self, record: RegistrationRecord) -> bool {
        if self.entities.get(&record.entity) == Some(&record) {
            return false;
        }
        self.entities.insert(record.entity.clone(), record);
        true
    }

    pub fn to_json(&self, path: &Path) -> Result<String, GenerateError> {
        serde_json::to_string_pretty(self)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| GenerateError::Registry {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Every generated file in write order: manifest first, then the three includes
    pub fn render_all(&self, paths: &RegistryPaths) -> Result<Vec<(PathBuf, String)>, GenerateError> {
        let render_error = |what: &str| {
            let what = what.to_string();
            move |e: askama::Error| GenerateError::Render {
                what,
                message: e.to_string(),
            }
        };
        let container = ContainerBindingsTemplate {
            entries: self.entities.values().collect(),
        }
        .render()
        .map_err(render_error("container bindings"))?;
        let routes = GeneratedRoutesTemplate {
            entries: self.entities.values().collect(),
        }
        .render()
        .map_err(render_error("generated routes"))?;
        let docs = GeneratedDocsTemplate {
            entries: self.entities.values().collect(),
        }
        .render()
        .map_err(render_error("generated docs"))?;
        Ok(vec![
            (paths.manifest.clone(), self.to_json(&paths.manifest)?),
            (paths.container.clone(), with_newline(container)),
            (paths.routes.clone(), with_newline(routes)),
            (paths.docs.clone(), with_newline(docs)),
        ])
    }
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}

/// What a registry sync did (or would do, in dry-run)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryOutcome {
    /// The entity was new or its record changed
    pub added: bool,
    /// Files whose content changed, relative to the project root
    pub changed_files: Vec<PathBuf>,
}

/// Record the entity and regenerate the include files under `root`
///
/// Files are only rewritten when their content differs.
pub fn sync_registry(
    root: &Path,
    paths: &RegistryPaths,
    names: &EntityNames,
    dry_run: bool,
) -> Result<RegistryOutcome, GenerateError> {
    let mut registry = Registry::load(&root.join(&paths.manifest))?;
    let added = registry.upsert(RegistrationRecord::from(names));
    let mut outcome = RegistryOutcome {
        added,
        ..RegistryOutcome::default()
    };

    for (relative, content) in registry.render_all(paths)? {
        let path = root.join(&relative);
        let current = fs::read_to_string(&path).ok();
        if current.as_deref() == Some(content.as_str()) {
            tracing::debug!(file = %path.display(), "registry file unchanged");
            continue;
        }
        if !dry_run {
            crate::generator::write_artifact(&path, &content)?;
            tracing::info!(file = %path.display(), "registry file updated");
        }
        outcome.changed_files.push(relative);
    }
    Ok(outcome)
}
