//! Completion suggestions from the symbols a file can see.

use std::sync::Arc;

use crate::hir::{Argument, FunctionDefinition, Variable, VisibleSymbols};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Function,
    Variable,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Function => 3,
            CompletionKind::Variable => 6,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Signature shown next to the label.
    pub detail: Option<Arc<str>>,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// A function with its signature as detail, e.g. `void (int client, bool quiet = false)`.
    pub fn from_function(function: &FunctionDefinition) -> Self {
        Self::new(function.name.as_str(), CompletionKind::Function)
            .with_detail(signature_detail(function))
    }

    pub fn from_variable(variable: &Variable) -> Self {
        Self::new(variable.name.as_str(), CompletionKind::Variable)
    }
}

fn signature_detail(function: &FunctionDefinition) -> String {
    let args: Vec<String> = function.args.iter().map(argument_detail).collect();
    format!("{} ({})", function.return_type, args.join(", "))
}

fn argument_detail(arg: &Argument) -> String {
    match &arg.default_value {
        Some(default) => format!("{} {} = {}", arg.ty, arg.name, default),
        None => format!("{} {}", arg.ty, arg.name),
    }
}

/// Functions followed by variables, in the order they are visible.
///
/// Callbacks are invoked by the host and are not offered.
pub fn completions(symbols: &VisibleSymbols) -> Vec<CompletionItem> {
    symbols
        .functions
        .iter()
        .map(CompletionItem::from_function)
        .chain(symbols.variables.iter().map(CompletionItem::from_variable))
        .collect()
}
