//! # crudgen
//!
//! **crudgen** generates the CRUD scaffold of one entity for an Express + Prisma +
//! Inversify TypeScript service, straight from the Prisma schema.
//!
//! ## Overview
//!
//! Given an entity name and a permission name, crudgen reads the `model` block of
//! the schema and writes ten artifacts (model interface, controller, service,
//! routes, request validators, two API-doc fragments and three tiers of tests).
//! It then registers the entity in the project's shared files: the
//! dependency-injection container, the route aggregator and the API-doc
//! aggregator. Registration is idempotent; artifacts are always regenerated.
//!
//! ## Architecture
//!
//! - **[`schema`]** - schema reading, model extraction and type mapping
//! - **[`generator`]** - validation rules, test data, doc definitions, template
//!   rendering and the orchestrating pipeline
//! - **[`patch`]** - idempotent registration, by anchor splicing or through a
//!   registry manifest
//! - **[`config`]** - `crudgen.toml` loading
//! - **[`error`]** - the fatal [`GenerateError`] and the non-fatal [`Warning`]
//! - **[`logging`]** - tracing subscriber setup
//! - **[`cli`]** - the `crudgen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as crudgen generate
//!     participant Schema as schema::extract
//!     participant Gen as generator
//!     participant Patch as patch
//!     participant FS as File System
//!
//!     User->>CLI: entity + permission
//!     CLI->>Schema: read_schema, extract(entity)
//!     Schema-->>CLI: ModelDefinition + warnings
//!     Note over CLI,Schema: unknown entity stops here, nothing written
//!     CLI->>Gen: synthesize_rules, synthesize_test_data, doc_definition
//!     Gen->>FS: render + write 10 artifacts
//!     CLI->>Patch: one PatchTarget per shared file
//!     Patch->>FS: splice snippets unless markers present
//!     CLI-->>User: summary
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Install the default templates into src/config/templates
//! crudgen templates
//!
//! # Generate and register an entity
//! crudgen generate --entity OrderItem --permission order.manage
//!
//! # See what would be generated
//! crudgen inspect --entity OrderItem
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod patch;
pub mod schema;

pub use error::{GenerateError, Warning};
pub use generator::{generate_entity, GenerateOptions, GenerationReport};
pub use schema::{extract, FieldDescriptor, ModelDefinition};
