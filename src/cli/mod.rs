//! # CLI Module
//!
//! Command-line front end of the `crudgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! crudgen generate --entity OrderItem --permission order.manage
//! ```
//!
//! Options:
//! - `--entity <NAME>` - Model name; prompted for when omitted
//! - `--permission <NAME>` - Permission name; prompted for when omitted
//! - `--root <DIR>` - Project root (default: current directory, or `CRUDGEN_ROOT`)
//! - `--config <FILE>` - Configuration file (default: `<root>/crudgen.toml` if present)
//! - `--registry` - Use the registry manifest instead of anchor patching
//! - `--dry-run` - Render and report without writing
//!
//! ### `inspect`
//!
//! ```bash
//! crudgen inspect --entity OrderItem | jq '.fields'
//! ```
//!
//! ### `templates`
//!
//! ```bash
//! crudgen templates --force
//! ```
//!
//! ## Exit Status
//!
//! `0` on success, `1` on any error. Errors are printed on stderr.

mod commands;


pub use commands::{prompt_non_empty, run_cli, run_cli_with_io, Cli, Commands};
