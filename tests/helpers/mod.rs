//! Shared fixtures and assertions for integration tests.

pub mod source_fixtures;

use sourcepawn::{ContentChange, Document, LineIndex, TextRange, TextSize};

/// A ranged change replacing the first occurrence of `needle` in `text`.
pub fn replace_first(text: &str, needle: &str, replacement: &str) -> ContentChange {
    let start = text
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{text}"));
    let range = TextRange::at(TextSize::from(start as u32), TextSize::of(needle));
    ContentChange::ranged(LineIndex::new(text).span(range), replacement)
}

/// Assert a document matches a fresh document built from its text.
pub fn assert_matches_fresh(document: &Document) {
    let fresh = Document::new(document.text());

    assert_eq!(
        format!("{:#?}", document.syntax()),
        format!("{:#?}", fresh.syntax()),
        "tree differs for:\n{}",
        document.text()
    );
    assert_eq!(document.errors(), fresh.errors());
    assert_eq!(document.functions(), fresh.functions());
    assert_eq!(document.callbacks(), fresh.callbacks());
    assert_eq!(document.prototypes(), fresh.prototypes());
    assert_eq!(document.variables(), fresh.variables());
    assert_eq!(document.dependencies(), fresh.dependencies());
}
