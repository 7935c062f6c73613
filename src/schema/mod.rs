//! # Schema Module
//!
//! Reads a Prisma-style schema-definition file and turns one `model` block into a
//! [`ModelDefinition`] that the generator consumes.
//!
//! ```text
//! schema.prisma → read_schema → extract(entity) → ModelDefinition
//!                                                  └─ FieldDescriptor { name, raw_type, type_tag, ... }
//! ```
//!
//! Only the scalar part of a block is extracted: a comment containing
//! `relation starts` ends parsing, so relation and foreign-key fields never reach
//! the generated validators or tests.

mod extract;
mod reader;
mod types;

pub use extract::{extract, FieldDescriptor, ModelDefinition, SYSTEM_FIELDS};
pub use reader::read_schema;
pub use types::{to_doc_type, to_output_type, TypeTag};
