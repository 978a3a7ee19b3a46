//! Rowan-based incremental parser for SourcePawn
//!
//! This module provides a lossless, incremental parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST preserves all whitespace and comments and tolerates malformed
//! input; a typed AST layer sits on top of it.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! HIR → Functions, callbacks, globals, includes
//! ```
//!
//! ## Incremental Reparsing
//!
//! When text changes, we:
//! 1. Find the top-level item strictly containing the change
//! 2. Reparse only that item
//! 3. Reuse unchanged green nodes, or fall back to a full parse

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod edit;
mod lexer;
mod reparse;
mod syntax_kind;

pub use ast::*;
pub use edit::InputEdit;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use reparse::parse_incremental;
pub use syntax_kind::{
    SourcePawnLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

#[cfg(test)]
mod tests;
