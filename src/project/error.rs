//! Error types for loading and resolving include files.

use std::path::PathBuf;

use thiserror::Error;

use crate::hir::Dependency;

/// A file could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file at the path.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but reading it failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Map an io error, keeping "not found" distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// One include edge could not be followed.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// No shared include directory was found for a `<name>` include.
    #[error("no `{name}` directory found above {}", start.display())]
    IncludeRootMissing { name: String, start: PathBuf },

    /// A `"file"` include in a document that has no directory to resolve from.
    #[error("{} has no parent directory", .0.display())]
    NoParentDirectory(PathBuf),
}

/// Severity level of a resolution diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A failed include edge, reported against the file that includes it.
///
/// Required includes produce errors, `#tryinclude` produces warnings.
#[derive(Debug)]
pub struct ResolveDiagnostic {
    pub severity: Severity,
    pub importer: PathBuf,
    pub dependency: Dependency,
    pub error: ResolveError,
}

impl ResolveDiagnostic {
    pub fn new(importer: PathBuf, dependency: Dependency, error: ResolveError) -> Self {
        let severity = if dependency.required {
            Severity::Error
        } else {
            Severity::Warning
        };
        Self {
            severity,
            importer,
            dependency,
            error,
        }
    }

    /// Human-readable message, e.g. for an editor diagnostic.
    pub fn message(&self) -> String {
        format!("cannot include `{}`: {}", self.dependency.path, self.error)
    }
}
