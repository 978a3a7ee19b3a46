//! Domain constants shared across the crate.

/// Extension appended to include paths that lack one.
pub const INCLUDE_EXTENSION: &str = "inc";

/// Name of the shared include directory searched upward from a document.
pub const INCLUDE_DIR_NAME: &str = "include";

/// Directive spelling for a required include.
pub const INCLUDE_DIRECTIVE: &str = "include";

/// Directive spelling for an optional include.
pub const TRYINCLUDE_DIRECTIVE: &str = "tryinclude";

/// Identifier that introduces an operator overload, e.g. `operator*(...)`.
pub const OPERATOR_NAME: &str = "operator";
