use super::*;
use smol_str::SmolStr;

// ============================================================================
// Names and types
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> Option<SmolStr> {
        find_token(&self.0, SyntaxKind::IDENT).map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(TypeRef, TYPE);

impl TypeRef {
    has_token_method!(is_legacy_tag, COLON, "Float:x");

    /// The type identifier, e.g. `int` for `int[]` or `Float` for `Float:`.
    ///
    /// For a tag union `{Float, _}:` this is the first tag.
    pub fn name(&self) -> Option<SmolStr> {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| SmolStr::new(t.text()))
    }

    /// Number of `[]` groups written after the type name.
    pub fn dimension_count(&self) -> usize {
        self.0.children().filter(|n| is_dimension(n.kind())).count()
    }
}

ast_node!(Expr, EXPR);

impl Expr {
    /// Raw source text of the expression.
    pub fn text(&self) -> String {
        trimmed_text(&self.0)
    }
}

// ============================================================================
// Functions
// ============================================================================

ast_node!(FunctionDeclaration, FUNCTION_DECLARATION);
ast_node!(CallbackImplementation, CALLBACK_IMPLEMENTATION);
ast_node!(FunctionPrototype, FUNCTION_PROTOTYPE);

/// Accessors shared by every function-shaped node.
macro_rules! signature_methods {
    () => {
        first_child_method!(name, Name);
        first_child_method!(return_type, TypeRef);
        first_child_method!(argument_list, ArgumentList);
        first_child_method!(body, Block);

        /// Arguments in declaration order; empty when the list is missing.
        pub fn arguments(&self) -> Vec<Argument> {
            self.argument_list()
                .map(|list| list.arguments().collect())
                .unwrap_or_default()
        }
    };
}

impl FunctionDeclaration {
    signature_methods!();
    has_token_method!(is_stock, STOCK_KW, "stock void F() {}");
    has_token_method!(is_static, STATIC_KW);
}

impl CallbackImplementation {
    signature_methods!();
}

impl FunctionPrototype {
    signature_methods!();
    has_token_method!(is_native, NATIVE_KW, "native int GetMaxClients();");
    has_token_method!(is_forward, FORWARD_KW, "forward void OnPluginStart();");
}

/// Any function-shaped declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    /// Plugin-declared routine with a body
    Declaration(FunctionDeclaration),
    /// `public` function the host calls into
    Callback(CallbackImplementation),
    /// `native`, `forward` or body-less declaration
    Prototype(FunctionPrototype),
}

impl AstNode for Function {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::FUNCTION_DECLARATION
                | SyntaxKind::CALLBACK_IMPLEMENTATION
                | SyntaxKind::FUNCTION_PROTOTYPE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FUNCTION_DECLARATION => Some(Self::Declaration(FunctionDeclaration(node))),
            SyntaxKind::CALLBACK_IMPLEMENTATION => {
                Some(Self::Callback(CallbackImplementation(node)))
            }
            SyntaxKind::FUNCTION_PROTOTYPE => Some(Self::Prototype(FunctionPrototype(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Declaration(n) => n.syntax(),
            Self::Callback(n) => n.syntax(),
            Self::Prototype(n) => n.syntax(),
        }
    }
}

impl Function {
    pub fn name(&self) -> Option<Name> {
        self.syntax().children().find_map(Name::cast)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        self.syntax().children().find_map(TypeRef::cast)
    }

    pub fn arguments(&self) -> Vec<Argument> {
        match self {
            Self::Declaration(n) => n.arguments(),
            Self::Callback(n) => n.arguments(),
            Self::Prototype(n) => n.arguments(),
        }
    }

    pub fn body(&self) -> Option<Block> {
        self.syntax().children().find_map(Block::cast)
    }
}

ast_node!(ArgumentList, ARGUMENT_LIST);

impl ArgumentList {
    children_method!(arguments, Argument);
}

ast_node!(Argument, ARGUMENT);

impl Argument {
    first_child_method!(name, Name);
    first_child_method!(ty, TypeRef);
    first_child_method!(default_value, DefaultValue);
    has_token_method!(is_const, CONST_KW, "const char[] s");
    has_token_method!(is_reference, AMP, "int &x");
    has_token_method!(is_variadic, ELLIPSIS, "any ...");

    /// Bracket groups anywhere in the argument, so `char[] s` and
    /// `char s[]` both count one.
    pub fn dimension_count(&self) -> usize {
        self.0.descendants().filter(|n| is_dimension(n.kind())).count()
    }
}

ast_node!(DefaultValue, DEFAULT_VALUE);

impl DefaultValue {
    first_child_method!(expr, Expr);

    /// Raw text after the `=`.
    pub fn text(&self) -> Option<String> {
        self.expr().map(|e| e.text())
    }
}

// ============================================================================
// Variables
// ============================================================================

ast_node!(VariableDeclaration, VARIABLE_DECLARATION);

impl VariableDeclaration {
    // Shared by all declarators, e.g. `char[]` in `char[] a, b;`
    first_child_method!(ty, TypeRef);
    children_method!(declarators, VariableDeclarator);
    has_token_method!(is_public, PUBLIC_KW);
    has_token_method!(is_static, STATIC_KW);
    has_token_method!(is_const, CONST_KW, "const int MAX = 10;");
    has_token_method!(is_legacy, NEW_KW, "new Handle:h;");
}

ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);

impl VariableDeclarator {
    first_child_method!(name, Name);
    // Legacy per-declarator tag, e.g. `Float:` in `new Float:x;`
    first_child_method!(ty, TypeRef);
    first_child_method!(initializer, Initializer);

    /// Bracket groups written after the name.
    pub fn dimension_count(&self) -> usize {
        self.0.children().filter(|n| is_dimension(n.kind())).count()
    }
}

ast_node!(Initializer, INITIALIZER);

impl Initializer {
    first_child_method!(expr, Expr);
}
