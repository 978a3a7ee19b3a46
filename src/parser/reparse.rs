//! Incremental reparsing.
//!
//! An edit strictly inside one top-level declaration only reparses that
//! declaration: its new text is lexed and parsed in isolation, and the
//! resulting green node is spliced into the old tree. Untouched declarations
//! share their green nodes with the previous tree.
//!
//! The shortcut is only taken when the isolated result is guaranteed to equal
//! what a full parse would produce. Otherwise the whole text is parsed again.

use rowan::{TextRange, TextSize};
use tracing::trace;

use super::edit::InputEdit;
use super::lexer::{Token, tokenize};
use super::parser::{Parse, SyntaxError, parse};
use super::syntax_kind::{SyntaxKind, SyntaxNode};

/// Parse `new_text`, reusing as much of `old` as the edit allows.
///
/// `new_text` must be the old text with `edit` applied.
pub fn parse_incremental(new_text: &str, old: &Parse, edit: &InputEdit) -> Parse {
    match reparse_item(new_text, old, edit) {
        Some(parse) => parse,
        None => {
            trace!(start = ?edit.start_position, "full reparse");
            parse(new_text)
        }
    }
}

fn is_reparsable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::FUNCTION_DECLARATION
            | SyntaxKind::CALLBACK_IMPLEMENTATION
            | SyntaxKind::FUNCTION_PROTOTYPE
            | SyntaxKind::VARIABLE_DECLARATION
            | SyntaxKind::ITEM
    )
}

/// Try to reparse only the top-level item containing the edit.
pub(crate) fn reparse_item(new_text: &str, old: &Parse, edit: &InputEdit) -> Option<Parse> {
    let root = old.syntax();
    let old_range = edit.old_range();
    let node = root.children().find(|node| {
        let range = node.text_range();
        is_reparsable(node.kind())
            && range.start() < old_range.start()
            && old_range.end() < range.end()
    })?;

    if !safe_left_context(&node) {
        return None;
    }

    let node_range = node.text_range();
    let next_start = next_significant_start(&node).unwrap_or(root.text_range().end());
    if old
        .errors
        .iter()
        .any(|e| e.range.start() >= node_range.start() && e.range.start() <= next_start)
    {
        return None;
    }

    let new_end = node_range.end() - edit.old_end + edit.new_end;
    let fragment = new_text.get(usize::from(node_range.start())..usize::from(new_end))?;
    if !lexes_in_isolation(&tokenize(fragment)) {
        return None;
    }

    let fragment_parse = parse(fragment);
    if !fragment_parse.ok() {
        return None;
    }
    let fragment_root = fragment_parse.syntax();
    let mut children = fragment_root.children_with_tokens();
    let item = children.next()?.into_node()?;
    if children.next().is_some() || item.kind() != node.kind() {
        return None;
    }

    trace!(
        kind = ?item.kind(),
        start = ?edit.start_position,
        old_end = ?edit.old_end_position,
        new_end = ?edit.new_end_position,
        "reparsed single item"
    );

    let green = node.replace_with(item.green().into_owned());
    let errors = old
        .errors
        .iter()
        .map(|e| {
            if e.range.start() < node_range.start() {
                e.clone()
            } else {
                SyntaxError::new(e.message.clone(), shift(e.range, edit))
            }
        })
        .collect();

    Some(Parse { green, errors })
}

/// The item must start a fresh token in context, and nothing earlier on its
/// line may be a lexing failure that the new text could complete.
fn safe_left_context(node: &SyntaxNode) -> bool {
    let Some(first) = node.first_token() else {
        return false;
    };
    let mut prev = first.prev_token();
    if let Some(token) = &prev {
        if !token.kind().is_trivia()
            && !matches!(token.kind(), SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE)
        {
            return false;
        }
    }
    while let Some(token) = prev {
        if token.kind() == SyntaxKind::ERROR {
            return false;
        }
        if token.text().contains('\n') {
            break;
        }
        prev = token.prev_token();
    }
    true
}

fn next_significant_start(node: &SyntaxNode) -> Option<TextSize> {
    let mut token = node.last_token()?.next_token();
    while let Some(t) = token {
        if !t.kind().is_trivia() {
            return Some(t.text_range().start());
        }
        token = t.next_token();
    }
    None
}

/// Tokens lexed from the fragment alone must be the tokens a full lex
/// produces: no failures, no comment delimiters that could pair with text
/// outside, and a final token that cannot extend. Every bracket group must
/// also close inside the fragment.
fn lexes_in_isolation(tokens: &[Token<'_>]) -> bool {
    if tokens.iter().any(|t| t.kind == SyntaxKind::ERROR) {
        return false;
    }
    let comment_delimiter = tokens.windows(2).any(|pair| {
        matches!(
            (pair[0].kind, pair[1].kind),
            (SyntaxKind::SLASH, SyntaxKind::STAR) | (SyntaxKind::STAR, SyntaxKind::SLASH)
        )
    });
    !comment_delimiter
        && brackets_balanced(tokens)
        && matches!(
            tokens.last().map(|t| t.kind),
            Some(SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE)
        )
}

fn brackets_balanced(tokens: &[Token<'_>]) -> bool {
    let mut open = Vec::new();
    for token in tokens {
        let closer = match token.kind {
            SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
            SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
            SyntaxKind::L_BRACE => SyntaxKind::R_BRACE,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                if open.pop() != Some(token.kind) {
                    return false;
                }
                continue;
            }
            _ => continue,
        };
        open.push(closer);
    }
    open.is_empty()
}

fn shift(range: TextRange, edit: &InputEdit) -> TextRange {
    TextRange::new(
        range.start() - edit.old_end + edit.new_end,
        range.end() - edit.old_end + edit.new_end,
    )
}
