//! # Generator Module
//!
//! Turns one extracted [`ModelDefinition`](crate::schema::ModelDefinition) into the
//! full CRUD scaffold of an Express + Prisma + Inversify project.
//!
//! ## Architecture
//!
//! ```text
//! schema.prisma → extract → ┬─ synthesize_rules ────┐
//!                           ├─ synthesize_test_data ├→ TemplateEngine (10 artifacts) → patch shared files
//!                           └─ doc_definition ──────┘
//! ```
//!
//! 1. **Extraction** - [`crate::schema::extract`] reads the model block; failure here
//!    aborts before any file is touched
//! 2. **Synthesis** - validation chains, test payloads and the API-doc definition are
//!    derived from the non-system fields
//! 3. **Rendering** - every artifact template is filled in by a single-pass
//!    `${placeholder}` substitution and written to its deterministic path
//! 4. **Registration** - the entity is spliced into the shared files (or recorded in
//!    the registry manifest), idempotently
//!
//! ## Generated Structure
//!
//! With the default configuration, generating `OrderItem` writes:
//!
//! ```text
//! src/
//! ├── models/OrderItem.ts
//! ├── controllers/orderItemController.ts
//! ├── services/orderItemService.ts
//! ├── routes/orderItemRoutes.ts
//! ├── validators/orderItemValidator.ts
//! ├── config/swagger/
//! │   ├── paths/orderItemPaths.ts
//! │   └── definitions/orderItemDefinition.ts
//! └── tests/
//!     ├── unit/controllers/orderItemController.test.ts
//!     ├── unit/services/orderItemService.test.ts
//!     └── integration/orderItem.integration.test.ts
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use crudgen::config::GeneratorConfig;
//! use crudgen::generator::{generate_entity, print_summary, GenerateOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = generate_entity(&GenerateOptions {
//!     root: ".".into(),
//!     entity: "OrderItem".into(),
//!     permission: "order.manage".into(),
//!     config: GeneratorConfig::default(),
//!     dry_run: false,
//! })?;
//! print_summary(&report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Template Customization
//!
//! Scaffold templates live in the configured template directory
//! (`src/config/templates` by default). `crudgen templates` installs the bundled
//! defaults there; edit them freely. Only the model has a built-in fallback.

mod bundled;
mod docs;
mod naming;
mod project;
mod templates;
mod test_data;
mod validation;

pub use bundled::{install_templates, InstallStatus, BUNDLED_TEMPLATES};
pub use docs::{doc_definition, doc_definition_json};
pub use naming::{lower_camel, pluralize, EntityNames};
pub use project::*;
pub use templates::*;
pub use test_data::{synthesize_test_data, SampleValues, TestDataSet, DATA_SEPARATOR};
pub use validation::{synthesize_rules, ValidationRuleSet, MAX_STRING_LENGTH, RULE_SEPARATOR};
