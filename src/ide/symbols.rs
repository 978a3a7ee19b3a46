//! Document outline.

use std::sync::Arc;

use crate::base::Span;
use crate::project::Document;

/// Kind of an outline entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Plugin-declared function or prototype
    Function,
    /// Callback the host invokes
    Method,
    Variable,
}

impl SymbolKind {
    /// Convert to LSP symbol kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            SymbolKind::Method => 6,
            SymbolKind::Function => 12,
            SymbolKind::Variable => 13,
        }
    }
}

/// One entry of the document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: Arc<str>,
    pub kind: SymbolKind,
    pub range: Span,
}

impl SymbolInfo {
    pub fn new(name: impl Into<Arc<str>>, kind: SymbolKind, range: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
        }
    }
}

/// Functions, then callbacks, then file-scope variables declared in the
/// document itself.
pub fn document_symbols(document: &Document) -> Vec<SymbolInfo> {
    let symbols = document.symbols();

    let functions = symbols
        .functions
        .iter()
        .map(|f| SymbolInfo::new(f.name.as_str(), SymbolKind::Function, f.range));
    let callbacks = symbols
        .callbacks
        .iter()
        .map(|c| SymbolInfo::new(c.name.as_str(), SymbolKind::Method, c.range));
    let variables = symbols
        .variables
        .iter()
        .map(|v| SymbolInfo::new(v.name.as_str(), SymbolKind::Variable, v.range));

    functions.chain(callbacks).chain(variables).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_symbols() {
        let document = Document::new(
            "int g_count;\npublic void OnPluginStart() {\n  int local;\n}\nvoid Helper() {}\n",
        );

        let symbols = document_symbols(&document);

        assert_eq!(
            symbols,
            vec![
                SymbolInfo::new("Helper", SymbolKind::Function, Span::from_coords(4, 0, 4, 16)),
                SymbolInfo::new("OnPluginStart", SymbolKind::Method, Span::from_coords(1, 0, 3, 1)),
                SymbolInfo::new("g_count", SymbolKind::Variable, Span::from_coords(0, 0, 0, 12)),
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(document_symbols(&Document::new("")).is_empty());
    }
}
