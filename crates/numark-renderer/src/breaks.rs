//! Trailing line-break resolution for block-level closes.
//!
//! Parsers emit empty tight paragraphs as placeholders inside tight lists.
//! Lookahead skips over any chain of them so a close tag gets the same
//! break it would get if they were absent, and no break is emitted right
//! before a list item closes.

use crate::token::{Token, TokenType};

/// Index of the first token after `idx` that is not part of an empty tight
/// paragraph chain.
///
/// Returns early (possibly out of bounds) when fewer than three tokens remain;
/// callers treat an out-of-bounds result as end of stream.
pub fn resolve(tokens: &[Token], idx: usize) -> usize {
    let mut idx = idx;
    loop {
        idx = idx.saturating_add(1);
        if idx.saturating_add(2) >= tokens.len() {
            return idx;
        }
        if !is_empty_tight_paragraph(&tokens[idx..idx + 3]) {
            return idx;
        }
        idx += 2;
    }
}

/// Break to append after the token at `idx`: `""` when the next meaningful
/// token closes a list item, otherwise `"\n"`.
pub fn get_break(tokens: &[Token], idx: usize) -> &'static str {
    match tokens.get(resolve(tokens, idx)) {
        Some(token) if token.is(&TokenType::ListItemClose) => "",
        _ => "\n",
    }
}

fn is_empty_tight_paragraph(window: &[Token]) -> bool {
    let [open, inline, close] = window else {
        return false;
    };
    open.is(&TokenType::ParagraphOpen)
        && open.tight
        && inline.is(&TokenType::Inline)
        && inline.content.is_empty()
        && close.is(&TokenType::ParagraphClose)
        && close.tight
}
