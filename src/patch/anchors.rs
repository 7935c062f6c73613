use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SharedFileConfig;
use crate::error::{GenerateError, Warning};
use crate::generator::{substitute, TemplateContext};

/// A shared file and the snippets to splice into it for one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    pub name: String,
    pub file_path: PathBuf,
    /// The entity is already registered when every marker is present
    pub existence_markers: Vec<String>,
    /// `(anchor, snippet)` pairs in declaration order
    pub insertion_anchors: Vec<(String, String)>,
}

impl PatchTarget {
    /// Instantiate a catalog entry for one entity
    pub fn from_config(config: &SharedFileConfig, root: &Path, ctx: &TemplateContext) -> Self {
        PatchTarget {
            name: config.name.clone(),
            file_path: root.join(&config.path),
            existence_markers: config
                .markers
                .iter()
                .map(|m| substitute(m, ctx))
                .collect(),
            insertion_anchors: config
                .anchors
                .iter()
                .map(|a| (substitute(&a.anchor, ctx), substitute(&a.snippet, ctx)))
                .collect(),
        }
    }
}

/// Outcome of patching one shared file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchResult {
    /// True when at least one snippet was inserted
    pub applied: bool,
    /// Number of snippets actually inserted
    pub inserted: usize,
    pub warnings: Vec<Warning>,
}

/// Whether `marker` occurs in `content` without being part of a longer identifier
///
/// `WidgetController` does not match inside `AdminWidgetController`.
fn contains_marker(content: &str, marker: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
    let check_before = marker.chars().next().is_some_and(is_ident);
    let check_after = marker.chars().next_back().is_some_and(is_ident);
    content.match_indices(marker).any(|(at, _)| {
        let before = content[..at].chars().next_back();
        let after = content[at + marker.len()..].chars().next();
        !(check_before && before.is_some_and(is_ident))
            && !(check_after && after.is_some_and(is_ident))
    })
}

/// Compute the patched content without touching the filesystem
///
/// Returns `None` as the content when nothing needs inserting: either the markers
/// show the entity is registered, or every snippet is already present or has no
/// anchor to land on.
pub fn plan_patch(content: &str, target: &PatchTarget) -> (Option<String>, PatchResult) {
    let registered = !target.existence_markers.is_empty()
        && target
            .existence_markers
            .iter()
            .all(|marker| contains_marker(content, marker));
    if registered {
        return (None, PatchResult::default());
    }

    let mut patched = content.to_string();
    let mut result = PatchResult::default();
    for (anchor, snippet) in &target.insertion_anchors {
        // a previous run may have landed this snippet while a sibling anchor was missing
        let body = snippet.trim();
        if !body.is_empty() && patched.contains(body) {
            continue;
        }
        match patched.find(anchor.as_str()) {
            Some(at) => {
                patched.insert_str(at, snippet);
                result.inserted += 1;
            }
            None => result.warnings.push(Warning::AnchorMissing {
                file: target.file_path.clone(),
                anchor: anchor.clone(),
            }),
        }
    }
    if result.inserted == 0 {
        return (None, result);
    }
    result.applied = true;
    (Some(patched), result)
}

/// Splice the entity's snippets into a shared file unless it is already registered
///
/// Missing anchors are skipped and reported. The file is rewritten in full when at
/// least one insertion succeeded and left untouched otherwise.
pub fn patch(target: &PatchTarget, entity_name: &str) -> Result<PatchResult, GenerateError> {
    let to_error = |source| GenerateError::SharedFile {
        path: target.file_path.clone(),
        source,
    };
    let content = fs::read_to_string(&target.file_path).map_err(to_error)?;
    let (patched, result) = plan_patch(&content, target);
    for warning in &result.warnings {
        tracing::warn!(entity = entity_name, "{warning}");
    }
    match patched {
        None => {
            tracing::info!(entity = entity_name, file = %target.file_path.display(), "nothing to insert in {}", target.name);
        }
        Some(patched) => {
            fs::write(&target.file_path, patched).map_err(to_error)?;
            tracing::info!(entity = entity_name, file = %target.file_path.display(), inserted = result.inserted, "patched {}", target.name);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_shared_catalog;
    use crate::generator::EntityNames;

    const INVERSIFY: &str = "import { Container } from 'inversify';\nimport { UserController } from '../controllers/userController';\n\nconst container = new Container();\n\ncontainer.bind<UserController>(UserController).toSelf();\n\nexport default container;\n";

    fn di_target(root: &Path) -> PatchTarget {
        let ctx = TemplateContext::for_entity(&EntityNames::new("Widget"), "widget.manage");
        PatchTarget::from_config(&default_shared_catalog()[0], root, &ctx)
    }

    #[test]
    fn test_target_is_rendered_for_entity() {
        let target = di_target(Path::new("/app"));
        assert_eq!(target.file_path, PathBuf::from("/app/src/config/inversifyConfig.ts"));
        assert_eq!(target.existence_markers, ["WidgetController", "WidgetService"]);
        assert!(target.insertion_anchors[0].1.contains("'../controllers/widgetController'"));
    }

    #[test]
    fn test_snippets_land_before_anchors() {
        let target = di_target(Path::new("/app"));
        let (patched, result) = plan_patch(INVERSIFY, &target);
        let patched = patched.unwrap();
        assert!(result.applied);
        assert_eq!(result.inserted, 2);
        let import = patched.find("import { WidgetController }").unwrap();
        let container = patched.find("const container = new Container();").unwrap();
        let bind = patched.find("container.bind<WidgetController>").unwrap();
        let export = patched.find("export default container;").unwrap();
        assert!(import < container && container < bind && bind < export);
    }

    #[test]
    fn test_second_plan_is_noop() {
        let target = di_target(Path::new("/app"));
        let (first, _) = plan_patch(INVERSIFY, &target);
        let (second, result) = plan_patch(&first.unwrap(), &target);
        assert!(second.is_none());
        assert!(!result.applied);
    }

    #[test]
    fn test_missing_anchor_is_reported_and_skipped() {
        let target = di_target(Path::new("/app"));
        let content = "const container = new Container();\n";
        let (patched, result) = plan_patch(content, &target);
        assert_eq!(result.inserted, 1);
        assert_eq!(
            result.warnings,
            vec![Warning::AnchorMissing {
                file: target.file_path.clone(),
                anchor: "export default container;".into()
            }]
        );
        assert!(patched.unwrap().contains("import { WidgetService }"));
    }

    #[test]
    fn test_patch_file_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = di_target(dir.path());
        fs::create_dir_all(target.file_path.parent().unwrap()).unwrap();
        fs::write(&target.file_path, INVERSIFY).unwrap();

        assert!(patch(&target, "Widget").unwrap().applied);
        let after_first = fs::read_to_string(&target.file_path).unwrap();
        assert!(!patch(&target, "Widget").unwrap().applied);
        let after_second = fs::read_to_string(&target.file_path).unwrap();
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.matches("container.bind<WidgetController>").count(), 1);
    }

    #[test]
    fn test_marker_must_match_whole_identifier() {
        let target = di_target(Path::new("/app"));
        let content = INVERSIFY
            .replace("UserController", "AdminWidgetController")
            .replace("const container", "import { AdminWidgetService } from '../services/adminWidgetService';\nconst container");
        let (patched, result) = plan_patch(&content, &target);
        assert!(result.applied);
        assert_eq!(result.inserted, 2);
        assert!(patched.unwrap().contains("container.bind<WidgetService>(WidgetService).toSelf();"));

        assert!(contains_marker("import WidgetRoutes from './widgetRoutes';", "widgetRoutes"));
        assert!(!contains_marker("import AdminWidgetRoutes;", "WidgetRoutes"));
        assert!(!contains_marker("WidgetRoutesV2", "WidgetRoutes"));
    }

    #[test]
    fn test_rerun_with_missing_anchor_is_noop() {
        let ctx = TemplateContext::for_entity(&EntityNames::new("Widget"), "widget.manage");
        let target = PatchTarget::from_config(&default_shared_catalog()[1], Path::new("/app"), &ctx);
        let content = "import { Router } from 'express';\nconst router = express.Router();\n\nexport default router;\n";

        let (first, result) = plan_patch(content, &target);
        let first = first.unwrap();
        assert!(result.applied);
        assert_eq!(result.inserted, 1);
        assert_eq!(result.warnings.len(), 1);

        let (second, result) = plan_patch(&first, &target);
        assert!(second.is_none());
        assert!(!result.applied);
        assert_eq!(result.inserted, 0);
        assert_eq!(first.matches("router.use(").count(), 1);
    }

    #[test]
    fn test_missing_shared_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch(&di_target(dir.path()), "Widget").unwrap_err();
        assert!(matches!(err, GenerateError::SharedFile { .. }));
    }
}
