use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::ArtifactKind;

/// Default scaffold templates compiled into the binary
///
/// The model is absent: it always has a built-in fallback.
pub const BUNDLED_TEMPLATES: [(ArtifactKind, &str); 9] = [
    (ArtifactKind::Controller, include_str!("../../assets/templates/controller.ts")),
    (ArtifactKind::Service, include_str!("../../assets/templates/service.ts")),
    (ArtifactKind::Routes, include_str!("../../assets/templates/routes.ts")),
    (ArtifactKind::Validator, include_str!("../../assets/templates/validator.ts")),
    (ArtifactKind::DocPaths, include_str!("../../assets/templates/swaggerPaths.ts")),
    (
        ArtifactKind::DocDefinition,
        include_str!("../../assets/templates/swaggerDefinition.ts"),
    ),
    (
        ArtifactKind::ControllerTest,
        include_str!("../../assets/templates/controller.test.ts"),
    ),
    (ArtifactKind::ServiceTest, include_str!("../../assets/templates/service.test.ts")),
    (ArtifactKind::IntegrationTest, include_str!("../../assets/templates/test.ts")),
];

/// Result of installing one bundled template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Written,
    SkippedExisting,
}

/// Copy the bundled templates into `dir`
///
/// Existing files are kept unless `force` is set.
pub fn install_templates(dir: &Path, force: bool) -> anyhow::Result<Vec<(PathBuf, InstallStatus)>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create template dir: {}", dir.display()))?;
    let mut installed = Vec::with_capacity(BUNDLED_TEMPLATES.len());
    for (kind, content) in BUNDLED_TEMPLATES {
        let path = dir.join(kind.template_file());
        if path.exists() && !force {
            println!("⚠️  Skipping existing template: {}", path.display());
            installed.push((path, InstallStatus::SkippedExisting));
            continue;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write template: {}", path.display()))?;
        println!("✅ Installed template: {}", path.display());
        installed.push((path, InstallStatus::Written));
    }
    Ok(installed)
}
