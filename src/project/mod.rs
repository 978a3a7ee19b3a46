//! Project management: open documents and the include files they pull in.
//!
//! A [`Workspace`] owns every tracked [`Document`]. Opening or editing a
//! document loads its `#include` / `#tryinclude` targets through a
//! [`FileSystem`], transitively, registering each file once.

mod config;
mod document;
mod error;
mod file_system;
mod paths;
mod workspace;

pub use config::WorkspaceConfig;
pub use document::{ContentChange, Document};
pub use error::{LoadError, ResolveDiagnostic, ResolveError, Severity};
pub use file_system::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use paths::normalize_path;
pub use workspace::{SharedWorkspace, Workspace};
