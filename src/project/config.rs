use std::path::PathBuf;

use crate::base::constants::INCLUDE_DIR_NAME;

/// Settings for include resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Name of the shared include directory searched for upward from a
    /// document's directory
    pub include_dir_name: String,
    /// Known include directory; skips the upward search entirely
    pub include_root: Option<PathBuf>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            include_dir_name: INCLUDE_DIR_NAME.to_string(),
            include_root: None,
        }
    }
}

impl WorkspaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_dir_name(mut self, name: impl Into<String>) -> Self {
        self.include_dir_name = name.into();
        self
    }

    pub fn with_include_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.include_root = Some(root.into());
        self
    }
}
