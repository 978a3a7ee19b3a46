//! Foundation types for the SourcePawn toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Byte offset to line/character conversion
//! - [`Position`], [`Span`] - Line/character positions for extracted records
//! - Domain constants (include extension, include directory name)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
