//! Include directives.

use std::path::Path;

use crate::base::constants::INCLUDE_EXTENSION;
use crate::base::{LineIndex, Span};
use crate::parser::ast::{AstNode, SourceFile};

/// Where an include path is looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncludeType {
    /// `<name>`, searched in the shared include directory
    Global,
    /// `"path"`, relative to the including file
    Relative,
}

/// One `#include` or `#tryinclude` directive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub include_type: IncludeType,
    /// `false` for `#tryinclude`
    pub required: bool,
    /// The written path, with `.inc` appended when it has no extension
    pub path: String,
    pub range: Span,
}

/// Include directives at file scope, in source order.
pub fn dependencies(file: &SourceFile, index: &LineIndex) -> Vec<Dependency> {
    file.includes()
        .filter_map(|include| {
            let path = include.path()?;
            let value = path.value();
            if value.is_empty() {
                return None;
            }
            Some(Dependency {
                include_type: if path.is_global() {
                    IncludeType::Global
                } else {
                    IncludeType::Relative
                },
                required: !include.is_optional(),
                path: with_include_extension(&value),
                range: index.span(include.syntax().text_range()),
            })
        })
        .collect()
}

/// Append `.inc` to a path whose file name has no extension.
pub fn with_include_extension(path: &str) -> String {
    if Path::new(path).extension().is_some() {
        path.to_string()
    } else {
        format!("{path}.{INCLUDE_EXTENSION}")
    }
}
