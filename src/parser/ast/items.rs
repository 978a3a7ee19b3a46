use super::*;

// ============================================================================
// Source File
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(items, Item);
    children_method!(includes, Include);
    children_method!(variable_declarations, VariableDeclaration);
    descendants_method!(functions, Function);
}

// ============================================================================
// Top-level items
// ============================================================================

/// A top-level item the semantic layer cares about.
///
/// Other directives, enums, methodmaps, typedefs and error nodes do not cast.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Include(Include),
    Function(Function),
    Variable(VariableDeclaration),
}

impl AstNode for Item {
    fn can_cast(kind: SyntaxKind) -> bool {
        Include::can_cast(kind) || Function::can_cast(kind) || VariableDeclaration::can_cast(kind)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PREPROC_INCLUDE => Some(Self::Include(Include(node))),
            SyntaxKind::VARIABLE_DECLARATION => Some(Self::Variable(VariableDeclaration(node))),
            kind if Function::can_cast(kind) => Function::cast(node).map(Self::Function),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Include(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Variable(n) => n.syntax(),
        }
    }
}

// ============================================================================
// Includes
// ============================================================================

ast_node!(Include, PREPROC_INCLUDE);

impl Include {
    first_child_method!(path, IncludePath);

    /// The directive keyword without its `#`, e.g. `include` or `tryinclude`.
    pub fn directive(&self) -> Option<String> {
        find_token(&self.0, SyntaxKind::PREPROC_KW)
            .map(|t| t.text().trim_start_matches('#').trim_start().to_string())
    }

    /// `#tryinclude` tolerates a missing file; `#include` does not.
    pub fn is_optional(&self) -> bool {
        self.directive().as_deref() == Some(crate::base::constants::TRYINCLUDE_DIRECTIVE)
    }
}

ast_node!(IncludePath, INCLUDE_PATH);

impl IncludePath {
    /// `<name>` form, looked up in the shared include directory
    pub fn is_global(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| t.kind() == SyntaxKind::LT)
    }

    /// The path between the delimiters, e.g. `sourcemod` for `<sourcemod>`.
    pub fn value(&self) -> String {
        let text = trimmed_text(&self.0);
        let inner = if self.is_global() {
            let text = text.strip_prefix('<').unwrap_or(&text);
            text.strip_suffix('>').unwrap_or(text)
        } else {
            let text = text.strip_prefix('"').unwrap_or(&text);
            text.strip_suffix('"').unwrap_or(text)
        };
        inner.trim().to_string()
    }
}

// ============================================================================
// Function bodies
// ============================================================================

ast_node!(Block, BLOCK);

impl Block {
    descendants_method!(local_variables, VariableDeclaration);
}
