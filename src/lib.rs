//! # sourcepawn-base
//!
//! Core library for SourcePawn editor tooling: parsing, declaration
//! extraction, include resolution and incremental document updates.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Completion items, document outline
//!   ↓
//! project   → Documents, workspace registry, include resolution
//!   ↓
//! hir       → Functions, callbacks, globals, includes, types
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST, reparse
//!   ↓
//! base      → Primitives (LineIndex, Position, Span, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → project → ide)
// ============================================================================

/// Foundation types: LineIndex, Position, Span, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Semantic records extracted from a syntax tree
pub mod hir;

/// Project management: documents, workspace, include resolution
pub mod project;

/// IDE features: completion, document symbols
pub mod ide;

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Type, VisibleSymbols};
pub use project::{ContentChange, Document, SharedWorkspace, Workspace};
