//! Logos-based lexer for SourcePawn
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token; bytes the lexer does not recognize become `ERROR`.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0x[0-9a-fA-F_]+")]
    #[regex(r"0b[01_]+")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    // =========================================================================
    // PREPROCESSOR
    // =========================================================================
    #[regex(r"#[ \t]*[a-zA-Z_]+")]
    PreprocKw,

    #[token("#")]
    Hash,

    #[token("\\")]
    Backslash,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("::")]
    ColonColon,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token(">>>")]
    Ushr,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token(">>>=")]
    AssignOp,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,

    // =========================================================================
    // KEYWORDS (longest match wins in logos)
    // =========================================================================
    #[token("public")]
    PublicKw,
    #[token("stock")]
    StockKw,
    #[token("static")]
    StaticKw,
    #[token("native")]
    NativeKw,
    #[token("forward")]
    ForwardKw,
    #[token("const")]
    ConstKw,
    #[token("new")]
    NewKw,
    #[token("decl")]
    DeclKw,
    #[token("enum")]
    EnumKw,
    #[token("struct")]
    StructKw,
    #[token("methodmap")]
    MethodmapKw,
    #[token("property")]
    PropertyKw,
    #[token("typedef")]
    TypedefKw,
    #[token("typeset")]
    TypesetKw,
    #[token("funcenum")]
    FuncenumKw,
    #[token("functag")]
    FunctagKw,
    #[token("function")]
    FunctionKw,
    #[token("using")]
    UsingKw,
    #[token("return")]
    ReturnKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("for")]
    ForKw,
    #[token("while")]
    WhileKw,
    #[token("do")]
    DoKw,
    #[token("switch")]
    SwitchKw,
    #[token("case")]
    CaseKw,
    #[token("default")]
    DefaultKw,
    #[token("break")]
    BreakKw,
    #[token("continue")]
    ContinueKw,
    #[token("delete")]
    DeleteKw,
    #[token("sizeof")]
    SizeofKw,
    #[token("view_as")]
    ViewAsKw,
    #[token("this")]
    ThisKw,
    #[token("null")]
    NullKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::Char => SyntaxKind::CHAR,
            LogosToken::PreprocKw => SyntaxKind::PREPROC_KW,
            LogosToken::Hash => SyntaxKind::HASH,
            LogosToken::Backslash => SyntaxKind::BACKSLASH,
            LogosToken::Ellipsis => SyntaxKind::ELLIPSIS,
            LogosToken::ColonColon => SyntaxKind::COLON_COLON,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::Shl => SyntaxKind::SHL,
            LogosToken::Shr => SyntaxKind::SHR,
            LogosToken::Ushr => SyntaxKind::USHR,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::AssignOp => SyntaxKind::ASSIGN_OP,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::PublicKw => SyntaxKind::PUBLIC_KW,
            LogosToken::StockKw => SyntaxKind::STOCK_KW,
            LogosToken::StaticKw => SyntaxKind::STATIC_KW,
            LogosToken::NativeKw => SyntaxKind::NATIVE_KW,
            LogosToken::ForwardKw => SyntaxKind::FORWARD_KW,
            LogosToken::ConstKw => SyntaxKind::CONST_KW,
            LogosToken::NewKw => SyntaxKind::NEW_KW,
            LogosToken::DeclKw => SyntaxKind::DECL_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::StructKw => SyntaxKind::STRUCT_KW,
            LogosToken::MethodmapKw => SyntaxKind::METHODMAP_KW,
            LogosToken::PropertyKw => SyntaxKind::PROPERTY_KW,
            LogosToken::TypedefKw => SyntaxKind::TYPEDEF_KW,
            LogosToken::TypesetKw => SyntaxKind::TYPESET_KW,
            LogosToken::FuncenumKw => SyntaxKind::FUNCENUM_KW,
            LogosToken::FunctagKw => SyntaxKind::FUNCTAG_KW,
            LogosToken::FunctionKw => SyntaxKind::FUNCTION_KW,
            LogosToken::UsingKw => SyntaxKind::USING_KW,
            LogosToken::ReturnKw => SyntaxKind::RETURN_KW,
            LogosToken::IfKw => SyntaxKind::IF_KW,
            LogosToken::ElseKw => SyntaxKind::ELSE_KW,
            LogosToken::ForKw => SyntaxKind::FOR_KW,
            LogosToken::WhileKw => SyntaxKind::WHILE_KW,
            LogosToken::DoKw => SyntaxKind::DO_KW,
            LogosToken::SwitchKw => SyntaxKind::SWITCH_KW,
            LogosToken::CaseKw => SyntaxKind::CASE_KW,
            LogosToken::DefaultKw => SyntaxKind::DEFAULT_KW,
            LogosToken::BreakKw => SyntaxKind::BREAK_KW,
            LogosToken::ContinueKw => SyntaxKind::CONTINUE_KW,
            LogosToken::DeleteKw => SyntaxKind::DELETE_KW,
            LogosToken::SizeofKw => SyntaxKind::SIZEOF_KW,
            LogosToken::ViewAsKw => SyntaxKind::VIEW_AS_KW,
            LogosToken::ThisKw => SyntaxKind::THIS_KW,
            LogosToken::NullKw => SyntaxKind::NULL_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
        }
    }
}
