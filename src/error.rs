//! Errors and non-fatal warnings raised while generating an entity scaffold.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal generation error
///
/// Every stage of the pipeline returns this type. Extraction errors are raised
/// before anything touches the filesystem; the remaining variants can occur after
/// earlier artifacts were already written (there is no rollback).
#[derive(Debug)]
pub enum GenerateError {
    /// The schema-definition file could not be read
    SchemaRead {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// No `model <entity> { ... }` block exists in the schema text
    EntityNotFound {
        /// The requested entity name (case-sensitive)
        entity: String,
    },
    /// A scaffold template is missing or unreadable
    TemplateRead {
        /// Artifact kind whose template failed
        kind: String,
        /// Template path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// A generated artifact could not be written
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// A shared file listed in the patch catalog could not be read or written
    SharedFile {
        /// Shared file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The registration manifest is corrupt or could not be serialized
    Registry {
        /// Manifest path
        path: PathBuf,
        /// Parser/serializer message
        message: String,
    },
    /// A built-in template failed to render
    Render {
        /// What was being rendered
        what: String,
        /// Renderer message
        message: String,
    },
    /// An interactive or command-line input was blank
    EmptyInput {
        /// Name of the input
        what: String,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::SchemaRead { path, source } => {
                write!(f, "failed to read schema {}: {}", path.display(), source)
            }
            GenerateError::EntityNotFound { entity } => {
                write!(f, "Model {} not found in schema", entity)
            }
            GenerateError::TemplateRead { kind, path, source } => write!(
                f,
                "failed to read {} template {}: {}",
                kind,
                path.display(),
                source
            ),
            GenerateError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            GenerateError::SharedFile { path, source } => {
                write!(f, "failed to patch shared file {}: {}", path.display(), source)
            }
            GenerateError::Registry { path, message } => {
                write!(f, "invalid registration manifest {}: {}", path.display(), message)
            }
            GenerateError::Render { what, message } => {
                write!(f, "failed to render {}: {}", what, message)
            }
            GenerateError::EmptyInput { what } => write!(f, "{} is required", what),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::SchemaRead { source, .. }
            | GenerateError::TemplateRead { source, .. }
            | GenerateError::Write { source, .. }
            | GenerateError::SharedFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Something that was skipped on purpose
///
/// Malformed schema lines and missing anchors are tolerated so that hand-edited
/// files never block generation. They are reported instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A field line inside the model block had fewer than two tokens
    MalformedFieldLine {
        /// 1-based line number in the schema file
        line: usize,
        /// The trimmed line text
        text: String,
    },
    /// A `@@` block attribute line was ignored
    BlockAttributeSkipped {
        /// 1-based line number in the schema file
        line: usize,
        /// The trimmed line text
        text: String,
    },
    /// An anchor was not found in a shared file, so its snippet was not inserted
    AnchorMissing {
        /// Shared file path
        file: PathBuf,
        /// The anchor text that was searched for
        anchor: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MalformedFieldLine { line, text } => {
                write!(f, "skipped malformed field line {}: {:?}", line, text)
            }
            Warning::BlockAttributeSkipped { line, text } => {
                write!(f, "skipped block attribute on line {}: {:?}", line, text)
            }
            Warning::AnchorMissing { file, anchor } => {
                write!(f, "anchor {:?} not found in {}", anchor, file.display())
            }
        }
    }
}
