//! IDE features: high-level APIs for editor request handlers.
//!
//! Each function corresponds to one editor request. Results use this crate's
//! own types and are converted to a wire protocol by the host.
//!
//! ## Usage
//!
//! ```ignore
//! let symbols = workspace.visible_symbols(path);
//! let items = sourcepawn::ide::completions(&symbols);
//!
//! let outline = sourcepawn::ide::document_symbols(workspace.document(path)?);
//! ```

mod completion;
mod symbols;

pub use completion::{CompletionItem, CompletionKind, completions};
pub use symbols::{SymbolInfo, SymbolKind, document_symbols};
