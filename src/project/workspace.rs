//! The set of tracked documents and the include graph between them.
//!
//! ## Usage
//!
//! ```ignore
//! let mut workspace = Workspace::new(OsFileSystem);
//!
//! // Opening a file pulls in everything it includes
//! let diagnostics = workspace.open("/sm/scripting/plugin.sp", text);
//!
//! // Symbols from the file and its includes
//! let symbols = workspace.visible_symbols("/sm/scripting/plugin.sp");
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::hir::{Dependency, IncludeType, VisibleSymbols};

use super::config::WorkspaceConfig;
use super::document::{ContentChange, Document};
use super::error::{ResolveDiagnostic, ResolveError, Severity};
use super::file_system::{FileSystem, OsFileSystem};
use super::paths::normalize_path;

/// A workspace shared between threads.
///
/// The lock covers a whole resolution, so two overlapping include graphs
/// never register the same file twice.
pub type SharedWorkspace<F = OsFileSystem> = Arc<Mutex<Workspace<F>>>;

/// Owns every tracked document, keyed by normalized path.
///
/// Documents enter either by being opened or by being included from a
/// tracked document. Registration is idempotent: a path already tracked is
/// never read again, which also makes include cycles terminate.
pub struct Workspace<F: FileSystem = OsFileSystem> {
    fs: F,
    config: WorkspaceConfig,
    documents: IndexMap<PathBuf, Document>,
    /// Shared include directory, memoized once found
    include_root: Option<PathBuf>,
    /// The missing include directory is reported once per severity
    root_missing_reported: FxHashSet<Severity>,
}

impl<F: FileSystem> Workspace<F> {
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, WorkspaceConfig::default())
    }

    pub fn with_config(fs: F, config: WorkspaceConfig) -> Self {
        let include_root = config.include_root.as_deref().map(normalize_path);
        Self {
            fs,
            config,
            documents: IndexMap::new(),
            include_root,
            root_missing_reported: FxHashSet::default(),
        }
    }

    pub fn into_shared(self) -> SharedWorkspace<F> {
        Arc::new(Mutex::new(self))
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// The shared include directory, if known yet.
    pub fn include_root(&self) -> Option<&Path> {
        self.include_root.as_deref()
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Track `path` with `content`, replacing any previous version, then load
    /// its includes.
    pub fn open(
        &mut self,
        path: impl AsRef<Path>,
        content: impl Into<String>,
    ) -> Vec<ResolveDiagnostic> {
        let path = normalize_path(path.as_ref());
        debug!(path = %path.display(), "open document");
        self.documents.insert(path.clone(), Document::new(content));
        self.resolve_from(&path)
    }

    /// Apply editor changes to a tracked document, then load any includes it
    /// gained.
    pub fn change(
        &mut self,
        path: impl AsRef<Path>,
        changes: &[ContentChange],
    ) -> Vec<ResolveDiagnostic> {
        let path = normalize_path(path.as_ref());
        let Some(document) = self.documents.get_mut(&path) else {
            warn!(path = %path.display(), "change for untracked document");
            return Vec::new();
        };
        document.apply_changes(changes);
        self.resolve_from(&path)
    }

    /// Stop tracking a document. Files it included stay tracked.
    pub fn close(&mut self, path: impl AsRef<Path>) -> Option<Document> {
        let path = normalize_path(path.as_ref());
        debug!(path = %path.display(), "close document");
        self.documents.shift_remove(&path)
    }

    pub fn document(&self, path: impl AsRef<Path>) -> Option<&Document> {
        self.documents.get(&normalize_path(path.as_ref()))
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.documents.contains_key(&normalize_path(path.as_ref()))
    }

    /// Tracked paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.documents.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Load every file `path` includes, directly or transitively, that is
    /// not tracked yet.
    ///
    /// Failures are returned per include edge and never stop the rest of the
    /// graph from loading.
    pub fn resolve_dependencies(&mut self, path: impl AsRef<Path>) -> Vec<ResolveDiagnostic> {
        let path = normalize_path(path.as_ref());
        self.resolve_from(&path)
    }

    fn resolve_from(&mut self, importer: &Path) -> Vec<ResolveDiagnostic> {
        let mut diagnostics = Vec::new();
        self.resolve_into(importer, &mut diagnostics);
        diagnostics
    }

    fn resolve_into(&mut self, importer: &Path, diagnostics: &mut Vec<ResolveDiagnostic>) {
        let Some(document) = self.documents.get(importer) else {
            return;
        };

        for dependency in document.dependencies() {
            let target = match self.locate(importer, &dependency) {
                Ok(target) => target,
                Err(error) => {
                    let diagnostic =
                        ResolveDiagnostic::new(importer.to_path_buf(), dependency, error);
                    if matches!(diagnostic.error, ResolveError::IncludeRootMissing { .. })
                        && !self.root_missing_reported.insert(diagnostic.severity)
                    {
                        trace!(path = %diagnostic.dependency.path, "include root still missing");
                        continue;
                    }
                    warn!(
                        importer = %importer.display(),
                        path = %diagnostic.dependency.path,
                        error = %diagnostic.error,
                        "cannot resolve include"
                    );
                    diagnostics.push(diagnostic);
                    continue;
                }
            };

            if self.documents.contains_key(&target) {
                continue;
            }

            match self.fs.read(&target) {
                Ok(content) => {
                    debug!(path = %target.display(), "register include");
                    self.documents.insert(target.clone(), Document::new(content));
                    self.resolve_into(&target, diagnostics);
                }
                Err(error) => {
                    warn!(importer = %importer.display(), %error, "failed to load include");
                    diagnostics.push(ResolveDiagnostic::new(
                        importer.to_path_buf(),
                        dependency,
                        error.into(),
                    ));
                }
            }
        }
    }

    /// Resolve an include to a path, discovering the include root on the
    /// first global include that needs it.
    fn locate(&mut self, importer: &Path, dependency: &Dependency) -> Result<PathBuf, ResolveError> {
        if dependency.include_type == IncludeType::Global && self.include_root.is_none() {
            let start = importer.parent().unwrap_or(importer);
            let root = self
                .fs
                .find_ancestor_dir(&self.config.include_dir_name, start)
                .ok_or_else(|| ResolveError::IncludeRootMissing {
                    name: self.config.include_dir_name.clone(),
                    start: start.to_path_buf(),
                })?;
            let root = normalize_path(&root);
            debug!(root = %root.display(), "include root found");
            self.include_root = Some(root);
        }

        self.target_path(importer, dependency)
            .ok_or_else(|| match dependency.include_type {
                IncludeType::Global => ResolveError::IncludeRootMissing {
                    name: self.config.include_dir_name.clone(),
                    start: importer.to_path_buf(),
                },
                IncludeType::Relative => ResolveError::NoParentDirectory(importer.to_path_buf()),
            })
    }

    /// Path an include refers to, without side effects.
    fn target_path(&self, importer: &Path, dependency: &Dependency) -> Option<PathBuf> {
        let base = match dependency.include_type {
            IncludeType::Global => self.include_root.clone()?,
            IncludeType::Relative => importer.parent()?.to_path_buf(),
        };
        Some(normalize_path(&base.join(&dependency.path)))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Tracked files reachable from `path` through includes, depth-first in
    /// include order.
    ///
    /// Each file appears once, even when reachable along several paths, and
    /// `path` itself is never part of the result. Untracked includes are
    /// skipped.
    pub fn dependency_closure(&self, path: impl AsRef<Path>) -> Vec<PathBuf> {
        let path = normalize_path(path.as_ref());
        let mut seen = FxHashSet::default();
        seen.insert(path.clone());
        let mut closure = Vec::new();
        self.collect_closure(&path, &mut seen, &mut closure);
        closure
    }

    fn collect_closure(
        &self,
        importer: &Path,
        seen: &mut FxHashSet<PathBuf>,
        closure: &mut Vec<PathBuf>,
    ) {
        let Some(document) = self.documents.get(importer) else {
            return;
        };
        for dependency in document.dependencies() {
            let Some(target) = self.target_path(importer, &dependency) else {
                continue;
            };
            if !self.documents.contains_key(&target) || !seen.insert(target.clone()) {
                continue;
            }
            closure.push(target.clone());
            self.collect_closure(&target, seen, closure);
        }
    }

    /// Symbols declared in `path` followed by those of its includes.
    pub fn visible_symbols(&self, path: impl AsRef<Path>) -> VisibleSymbols {
        let path = normalize_path(path.as_ref());
        let mut symbols = self
            .documents
            .get(&path)
            .map(Document::symbols)
            .unwrap_or_default();
        for dependency in self.dependency_closure(&path) {
            if let Some(document) = self.documents.get(&dependency) {
                symbols.extend(document.symbols());
            }
        }
        symbols
    }
}
