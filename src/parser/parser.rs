//! Recursive descent parser for SourcePawn
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: parsing never fails,
//! malformed input ends up in `ERROR` nodes and in [`Parse::errors`].
//!
//! Nodes never start or end with trivia. Trivia is attached lazily to the
//! innermost open node right before the next significant token, so node
//! ranges cover exactly the declaration text.

use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::base::constants::{INCLUDE_DIRECTIVE, OPERATOR_NAME, TRYINCLUDE_DIRECTIVE};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The source text this tree was built from
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse SourcePawn source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Shape of a declaration, decided by lookahead before parsing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclShape {
    Function,
    Variable,
    Operator,
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Index of the n-th significant token at or after the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| self.pos + idx)
    }

    /// Look ahead, skipping trivia
    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn nth_text(&self, n: usize) -> &'a str {
        self.nth_index(n).map(|idx| self.tokens[idx].text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.nth(0) == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.nth(0))
    }

    fn at_eof(&self) -> bool {
        self.nth(0) == SyntaxKind::EOF
    }

    /// True when the next significant token sits on the current line
    fn next_on_same_line(&self) -> bool {
        for token in &self.tokens[self.pos..] {
            if !token.kind.is_trivia() {
                return true;
            }
            if token.text.contains('\n') {
                return false;
            }
        }
        false
    }

    /// Index just past a run of empty `[]` pairs starting at lookahead `n`
    fn skip_empty_brackets(&self, mut n: usize) -> usize {
        while self.nth(n) == SyntaxKind::L_BRACKET && self.nth(n + 1) == SyntaxKind::R_BRACKET {
            n += 2;
        }
        n
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn eat_trivia(&mut self) {
        while let Some(token) = self.current() {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the next significant token (and the trivia before it)
    fn bump(&mut self) {
        self.eat_trivia();
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = match self.nth_index(0) {
            Some(idx) => {
                let t = &self.tokens[idx];
                TextRange::at(t.offset, TextSize::of(t.text))
            }
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            }
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Wrap tokens up to (not including) one of `recovery` in an ERROR node
    fn error_until(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        if self.at_eof() || self.at_any(recovery) {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        while !self.at_eof() && !self.at_any(recovery) && self.next_on_same_line() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules: top level
    // =========================================================================

    /// SourceFile = Item*
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        while !self.at_eof() {
            let pos_before = self.pos;
            self.parse_item();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.nth(0)));
                self.start_node(SyntaxKind::ERROR);
                self.bump();
                self.finish_node();
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// Item = Preprocessor | SkippedItem | Operator | Function | VariableDeclaration
    fn parse_item(&mut self) {
        match self.nth(0) {
            SyntaxKind::PREPROC_KW => self.parse_preprocessor(),
            kind if kind.starts_item() => {
                self.start_node(SyntaxKind::ITEM);
                self.skip_balanced();
                self.finish_node();
            }
            _ => match self.classify_declaration() {
                Some(DeclShape::Function) => self.parse_function(),
                Some(DeclShape::Variable) => self.parse_variable_declaration(),
                Some(DeclShape::Operator) => {
                    self.start_node(SyntaxKind::ITEM);
                    self.skip_balanced();
                    self.finish_node();
                }
                None => {
                    self.error("expected declaration");
                    self.start_node(SyntaxKind::ERROR);
                    self.skip_balanced();
                    self.finish_node();
                }
            },
        }
    }

    /// Decide whether the upcoming tokens form a function or a variable.
    ///
    /// Recognizes `Type name`, `Type[] name`, legacy `Tag:name` and untyped
    /// `name`, optionally behind modifiers like `public` or `new`. Operator
    /// overloads are told apart so they can be skipped.
    fn classify_declaration(&self) -> Option<DeclShape> {
        let mut i = 0;
        while self.nth(i).is_modifier() {
            i += 1;
        }
        if self.nth(i) != SyntaxKind::IDENT {
            return None;
        }

        let name = if self.nth(i + 1) == SyntaxKind::COLON && self.nth(i + 2) == SyntaxKind::IDENT {
            i + 2
        } else if self.nth(i + 1) == SyntaxKind::IDENT {
            i + 1
        } else if self.nth(i + 1) == SyntaxKind::L_BRACKET {
            let j = self.skip_empty_brackets(i + 1);
            if j > i + 1 && self.nth(j) == SyntaxKind::IDENT {
                j
            } else {
                i
            }
        } else {
            i
        };

        if self.at_operator_name(name) {
            return Some(DeclShape::Operator);
        }

        match self.nth(name + 1) {
            SyntaxKind::L_PAREN => Some(DeclShape::Function),
            _ if i > 0 || name > i => Some(DeclShape::Variable),
            _ => None,
        }
    }

    /// `operator` followed by one or two operator tokens and `(`
    fn at_operator_name(&self, n: usize) -> bool {
        self.nth(n) == SyntaxKind::IDENT
            && self.nth_text(n) == OPERATOR_NAME
            && !matches!(
                self.nth(n + 1),
                SyntaxKind::L_PAREN
                    | SyntaxKind::IDENT
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::COMMA
                    | SyntaxKind::L_BRACKET
            )
            && (self.nth(n + 2) == SyntaxKind::L_PAREN || self.nth(n + 3) == SyntaxKind::L_PAREN)
    }

    /// Consume tokens up to a `;` or through a balanced `{ ... }` group
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.nth(0) {
                SyntaxKind::EOF => {
                    if depth > 0 {
                        self.error("unclosed '{'");
                    }
                    break;
                }
                SyntaxKind::PREPROC_KW if depth == 0 => break,
                SyntaxKind::SEMICOLON if depth == 0 => {
                    self.bump();
                    break;
                }
                SyntaxKind::L_BRACE => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_BRACE => {
                    self.bump();
                    if depth <= 1 {
                        if depth == 1 {
                            self.eat(SyntaxKind::SEMICOLON);
                        }
                        break;
                    }
                    depth -= 1;
                }
                _ => self.bump(),
            }
        }
    }

    // =========================================================================
    // Preprocessor
    // =========================================================================

    fn parse_preprocessor(&mut self) {
        let directive = self.nth_text(0).trim_start_matches('#').trim_start();
        if directive == INCLUDE_DIRECTIVE || directive == TRYINCLUDE_DIRECTIVE {
            self.parse_include();
        } else {
            self.parse_directive();
        }
    }

    /// Include = ('#include' | '#tryinclude') ('<' path '>' | STRING)
    fn parse_include(&mut self) {
        self.start_node(SyntaxKind::PREPROC_INCLUDE);
        self.bump();

        if !self.next_on_same_line() {
            self.error("expected include path");
        } else if self.at(SyntaxKind::STRING) {
            self.start_node(SyntaxKind::INCLUDE_PATH);
            self.bump();
            self.finish_node();
        } else if self.at(SyntaxKind::LT) {
            self.start_node(SyntaxKind::INCLUDE_PATH);
            self.bump();
            while self.next_on_same_line() && !self.at(SyntaxKind::GT) {
                self.bump();
            }
            if self.next_on_same_line() && self.at(SyntaxKind::GT) {
                self.bump();
            } else {
                self.error("unterminated include path");
            }
            self.finish_node();
        } else {
            self.error("expected include path");
        }

        self.finish_node();
    }

    /// Any other directive runs to the end of the line, honoring `\` continuations
    fn parse_directive(&mut self) {
        self.start_node(SyntaxKind::PREPROC_DIRECTIVE);
        let mut last = self.nth(0);
        self.bump();
        loop {
            if self.next_on_same_line() || (last == SyntaxKind::BACKSLASH && !self.at_eof()) {
                last = self.nth(0);
                self.bump();
            } else {
                break;
            }
        }
        self.finish_node();
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Function = Modifier* ReturnType? Name ArgumentList (Block | ';')
    fn parse_function(&mut self) {
        let checkpoint = self.checkpoint();

        let mut is_public = false;
        let mut is_prototype = false;
        while self.nth(0).is_modifier() {
            match self.nth(0) {
                SyntaxKind::PUBLIC_KW => is_public = true,
                SyntaxKind::NATIVE_KW | SyntaxKind::FORWARD_KW => is_prototype = true,
                _ => {}
            }
            self.bump();
        }

        if self.nth(0) == SyntaxKind::IDENT
            && (self.nth(1) == SyntaxKind::COLON
                || self.nth(1) == SyntaxKind::IDENT
                || self.nth(1) == SyntaxKind::L_BRACKET)
        {
            self.parse_type();
        }
        self.parse_name("expected function name");
        self.parse_argument_list();

        if !self.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON]) {
            self.error_until(
                "expected function body",
                &[
                    SyntaxKind::L_BRACE,
                    SyntaxKind::SEMICOLON,
                    SyntaxKind::R_BRACE,
                    SyntaxKind::PREPROC_KW,
                ],
            );
        }

        let has_body = if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
            true
        } else {
            self.eat(SyntaxKind::SEMICOLON);
            false
        };

        let kind = match (has_body && !is_prototype, is_public) {
            (true, true) => SyntaxKind::CALLBACK_IMPLEMENTATION,
            (true, false) => SyntaxKind::FUNCTION_DECLARATION,
            (false, _) => SyntaxKind::FUNCTION_PROTOTYPE,
        };
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    fn parse_name(&mut self, message: &str) {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error(message);
        }
    }

    /// Type = IDENT ':'            (legacy tag)
    ///      | IDENT ('[' ']')*     (prefix type)
    ///      | '{' IDENT,* '}' ':'  (legacy tag union)
    fn parse_type(&mut self) {
        self.start_node(SyntaxKind::TYPE);
        if self.at(SyntaxKind::L_BRACE) {
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) && !self.at(SyntaxKind::R_PAREN) {
                self.bump();
            }
            self.expect(SyntaxKind::R_BRACE);
            self.expect(SyntaxKind::COLON);
        } else {
            self.bump();
            if !self.eat(SyntaxKind::COLON) {
                while self.at(SyntaxKind::L_BRACKET) {
                    self.parse_dimension();
                }
            }
        }
        self.finish_node();
    }

    /// Dimension = '[' ']' ; FixedDimension = '[' Expr ']'
    fn parse_dimension(&mut self) {
        if self.nth(1) == SyntaxKind::R_BRACKET {
            self.start_node(SyntaxKind::DIMENSION);
            self.bump();
            self.bump();
        } else {
            self.start_node(SyntaxKind::FIXED_DIMENSION);
            self.bump();
            self.parse_expr();
            self.expect(SyntaxKind::R_BRACKET);
        }
        self.finish_node();
    }

    /// ArgumentList = '(' (Argument (',' Argument)*)? ')'
    fn parse_argument_list(&mut self) {
        self.start_node(SyntaxKind::ARGUMENT_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
            loop {
                self.parse_argument();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Argument = 'const'? '&'? Type? '&'? (Name | '...') Dimension* DefaultValue?
    fn parse_argument(&mut self) {
        self.start_node(SyntaxKind::ARGUMENT);
        self.eat(SyntaxKind::CONST_KW);
        self.eat(SyntaxKind::AMP);

        let has_type = match self.nth(0) {
            SyntaxKind::L_BRACE => true,
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::COLON => true,
            SyntaxKind::IDENT => {
                let after = self.skip_empty_brackets(1);
                matches!(
                    self.nth(after),
                    SyntaxKind::IDENT | SyntaxKind::AMP | SyntaxKind::ELLIPSIS
                )
            }
            _ => false,
        };
        if has_type {
            self.parse_type();
        }
        self.eat(SyntaxKind::AMP);

        if self.at(SyntaxKind::ELLIPSIS) {
            self.bump();
        } else {
            self.parse_name("expected argument name");
        }

        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_dimension();
        }

        if self.at(SyntaxKind::EQ) {
            self.start_node(SyntaxKind::DEFAULT_VALUE);
            self.bump();
            self.parse_expr();
            self.finish_node();
        }

        if !self.at_any(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]) {
            self.error_until(
                "expected ',' or ')'",
                &[
                    SyntaxKind::COMMA,
                    SyntaxKind::R_PAREN,
                    SyntaxKind::L_BRACE,
                    SyntaxKind::SEMICOLON,
                ],
            );
        }
        self.finish_node();
    }

    // =========================================================================
    // Expressions (kept as raw token runs)
    // =========================================================================

    /// Expr = tokens up to a `,` `;` or unbalanced closer at nesting depth 0
    fn parse_expr(&mut self) {
        if self.at_any(&[
            SyntaxKind::COMMA,
            SyntaxKind::SEMICOLON,
            SyntaxKind::R_PAREN,
            SyntaxKind::R_BRACKET,
            SyntaxKind::R_BRACE,
            SyntaxKind::PREPROC_KW,
            SyntaxKind::EOF,
        ]) {
            self.error("expected expression");
            return;
        }

        self.start_node(SyntaxKind::EXPR);
        let mut depth = 0usize;
        loop {
            match self.nth(0) {
                SyntaxKind::EOF | SyntaxKind::SEMICOLON | SyntaxKind::PREPROC_KW => break,
                SyntaxKind::COMMA if depth == 0 => break,
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                _ => self.bump(),
            }
        }
        self.finish_node();
    }

    // =========================================================================
    // Variables
    // =========================================================================

    /// VariableDeclaration = Modifier* Type? Declarator (',' Declarator)* ';'
    fn parse_variable_declaration(&mut self) {
        self.start_node(SyntaxKind::VARIABLE_DECLARATION);
        while self.nth(0).is_modifier() {
            self.bump();
        }

        if self.at(SyntaxKind::IDENT) {
            let after = self.skip_empty_brackets(1);
            if self.nth(after) == SyntaxKind::IDENT {
                self.parse_type();
            }
        }

        loop {
            self.parse_declarator();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Declarator = (IDENT ':')? Name Dimension* Initializer?
    fn parse_declarator(&mut self) {
        self.start_node(SyntaxKind::VARIABLE_DECLARATOR);
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::COLON {
            self.parse_type();
        }
        self.parse_name("expected variable name");

        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_dimension();
        }

        if self.at(SyntaxKind::EQ) {
            self.start_node(SyntaxKind::INITIALIZER);
            self.bump();
            self.parse_expr();
            self.finish_node();
        }
        self.finish_node();
    }

    // =========================================================================
    // Bodies
    // =========================================================================

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.nth(0)));
                self.start_node(SyntaxKind::ERROR);
                self.bump();
                self.finish_node();
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.nth(0) {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::PREPROC_KW => self.parse_preprocessor(),
            _ if self.at_local_variable() => self.parse_variable_declaration(),
            _ => self.parse_generic_statement(),
        }
    }

    fn at_local_variable(&self) -> bool {
        let mut i = 0;
        while matches!(
            self.nth(i),
            SyntaxKind::NEW_KW | SyntaxKind::DECL_KW | SyntaxKind::STATIC_KW | SyntaxKind::CONST_KW
        ) {
            i += 1;
        }
        if i > 0 {
            return self.nth(i) == SyntaxKind::IDENT;
        }
        self.nth(0) == SyntaxKind::IDENT && self.nth(self.skip_empty_brackets(1)) == SyntaxKind::IDENT
    }

    /// Statement = tokens up to ';' at depth 0, or up to a trailing block
    /// (continued by `else` / `while`)
    fn parse_generic_statement(&mut self) {
        self.start_node(SyntaxKind::STATEMENT);
        let mut depth = 0usize;
        loop {
            match self.nth(0) {
                SyntaxKind::EOF => {
                    if depth > 0 {
                        self.error("unclosed delimiter");
                    }
                    break;
                }
                SyntaxKind::PREPROC_KW => break,
                SyntaxKind::SEMICOLON if depth == 0 => {
                    self.bump();
                    break;
                }
                SyntaxKind::L_BRACE if depth == 0 => {
                    self.parse_block();
                    if !self.at_any(&[SyntaxKind::ELSE_KW, SyntaxKind::WHILE_KW]) {
                        break;
                    }
                }
                SyntaxKind::R_BRACE if depth == 0 => break,
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                _ => self.bump(),
            }
        }
        self.finish_node();
    }
}
