//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.

/// All syntax kinds (tokens and nodes) in SourcePawn
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, blocks, directives).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,    // identifier, including type names like `int` or `Float`
    INTEGER,  // 42, 0x2A
    FLOAT,    // 3.14
    STRING,   // "hello"
    CHAR,     // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COLON_COLON, // ::
    COMMA,       // ,
    DOT,         // .
    ELLIPSIS,    // ...
    EQ,          // =
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    SHL,         // <<
    SHR,         // >>
    USHR,        // >>>
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    TILDE,       // ~
    BANG,        // !
    QUESTION,    // ?
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    ASSIGN_OP,   // += -= *= /= %= &= |= ^= <<= >>= >>>=
    BACKSLASH,   // \ (line continuation in directives)
    HASH,        // # on its own
    PREPROC_KW,  // #include, #tryinclude, #define, #pragma, ...

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Declaration modifiers
    PUBLIC_KW,
    STOCK_KW,
    STATIC_KW,
    NATIVE_KW,
    FORWARD_KW,
    CONST_KW,
    NEW_KW,
    DECL_KW,

    // Type-level items
    ENUM_KW,
    STRUCT_KW,
    METHODMAP_KW,
    PROPERTY_KW,
    TYPEDEF_KW,
    TYPESET_KW,
    FUNCENUM_KW,
    FUNCTAG_KW,
    FUNCTION_KW,
    USING_KW,

    // Statements and expressions
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    FOR_KW,
    WHILE_KW,
    DO_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    BREAK_KW,
    CONTINUE_KW,
    DELETE_KW,
    SIZEOF_KW,
    VIEW_AS_KW,
    THIS_KW,
    NULL_KW,
    TRUE_KW,
    FALSE_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,

    // Preprocessor
    PREPROC_INCLUDE,
    INCLUDE_PATH,
    PREPROC_DIRECTIVE,

    // Functions
    FUNCTION_DECLARATION,
    CALLBACK_IMPLEMENTATION,
    FUNCTION_PROTOTYPE,
    NAME,
    TYPE,
    ARGUMENT_LIST,
    ARGUMENT,
    DEFAULT_VALUE,
    DIMENSION,
    FIXED_DIMENSION,

    // Bodies
    BLOCK,
    STATEMENT,
    EXPR,

    // Variables
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    INITIALIZER,

    // Enums, methodmaps, typedefs and friends (skipped as balanced groups)
    ITEM,

    // Special
    ERROR,
    EOF, // Lookahead past the last token; never stored in a tree

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PUBLIC_KW as u16) && (self as u16) <= (Self::FALSE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::PREPROC_KW as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IDENT | Self::INTEGER | Self::FLOAT | Self::STRING | Self::CHAR
        )
    }

    /// Check if this keyword may prefix a declaration (`public`, `stock`, `new`, ...)
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::STOCK_KW
                | Self::STATIC_KW
                | Self::NATIVE_KW
                | Self::FORWARD_KW
                | Self::CONST_KW
                | Self::NEW_KW
                | Self::DECL_KW
        )
    }

    /// Check if this keyword opens a type-level item skipped by the extractor
    pub fn starts_item(self) -> bool {
        matches!(
            self,
            Self::ENUM_KW
                | Self::STRUCT_KW
                | Self::METHODMAP_KW
                | Self::TYPEDEF_KW
                | Self::TYPESET_KW
                | Self::FUNCENUM_KW
                | Self::FUNCTAG_KW
                | Self::USING_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourcePawnLanguage {}

impl rowan::Language for SourcePawnLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SourcePawnLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SourcePawnLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SourcePawnLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<SourcePawnLanguage>;
