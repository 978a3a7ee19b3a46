//! High-level IR (HIR): the semantic records editor features consume.
//!
//! Records are recomputed from the current tree on every query and never
//! mutated afterwards.
//!
//! ## Key Types
//!
//! - [`Type`] - built-in, custom or dimensional (array) type
//! - [`FunctionDefinition`] / [`CallbackImplementation`] - function signatures
//! - [`Variable`] - a file-scope variable
//! - [`Dependency`] - an `#include` / `#tryinclude` directive
//! - [`VisibleSymbols`] - everything a file can see through its includes

mod declarations;
mod dependencies;
mod types;

pub use declarations::{
    Argument, CallbackImplementation, FunctionDefinition, Variable, callback_implementations,
    function_definitions, function_prototypes, global_variables,
};
pub use dependencies::{Dependency, IncludeType, dependencies, with_include_extension};
pub use types::{BuiltInType, ElementType, Type, parse_type};

use crate::base::LineIndex;
use crate::parser::SourceFile;

/// Symbols contributed by one or more files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSymbols {
    /// Definitions followed by prototypes
    pub functions: Vec<FunctionDefinition>,
    pub callbacks: Vec<CallbackImplementation>,
    pub variables: Vec<Variable>,
}

impl VisibleSymbols {
    /// Symbols declared directly in `file`.
    pub fn of_file(file: &SourceFile, index: &LineIndex) -> Self {
        let mut functions = function_definitions(file, index);
        functions.extend(function_prototypes(file, index));
        Self {
            functions,
            callbacks: callback_implementations(file, index),
            variables: global_variables(file, index),
        }
    }

    pub fn extend(&mut self, other: VisibleSymbols) {
        self.functions.extend(other.functions);
        self.callbacks.extend(other.callbacks);
        self.variables.extend(other.variables);
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.callbacks.is_empty() && self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests;
