//! Idempotent registration of a new entity in the project's shared files.
//!
//! Two strategies are available:
//!
//! - [`anchors`] splices rendered snippets immediately before known anchor lines
//!   in hand-maintained files, skipping a file when its existence markers show
//!   the entity is already there.
//! - [`registry`] keeps a JSON manifest of registered entities and regenerates
//!   include-once files from it.

pub mod anchors;
pub mod registry;

pub use anchors::{patch, plan_patch, PatchResult, PatchTarget};
pub use registry::{sync_registry, Registry, RegistrationRecord, RegistryOutcome};
