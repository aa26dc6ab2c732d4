//! Loader, validator, and inspector for declarative process files.
//!
//! A process file declares one or more apps for an external supervisor:
//! what to launch, how to restart it, and where to log. This crate parses
//! those files (TOML, JSON, or YAML) into typed [`ProcessDescriptor`]
//! records, canonicalizes human-readable units (`"1G"` → bytes, `"10s"` →
//! milliseconds) and enforces the descriptor invariants. It never spawns a
//! process itself; the restart policy fields are data for the supervisor
//! to interpret.
//!
//! ```no_run
//! let file = procdef::load_path(std::path::Path::new("procdef.toml"))?;
//! for app in &file.apps {
//!     println!("{} -> {}", app.name, app.resolved_script().display());
//! }
//! # Ok::<(), procdef::ProcdefError>(())
//! ```

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod init;
pub mod loader;
pub mod output;
pub mod units;

pub use descriptor::{ProcessDescriptor, ProcessFile};
pub use error::{ProcdefError, Result, SchemaError, ValidationError};
pub use loader::{from_json_str, from_toml_str, from_yaml_str, load_path, SourceFormat};
