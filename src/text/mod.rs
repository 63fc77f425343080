//! # Text Sanitization and Wrapping
//!
//! The two text stages every cell and paragraph pass through before any
//! drawing: `sanitize` maps input down to the WinAnsi-safe repertoire the
//! standard fonts can measure, and `wrap` breaks a string into lines that
//! fit a pixel budget using greedy accumulation with a character-level
//! fallback for unbroken over-wide tokens.
//!
//! Sanitization must run before measurement — unmapped glyphs have no
//! defined advance width and would corrupt wrap decisions.

use crate::font::{FontContext, FontVariant};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The truncation marker appended when a `max_lines` cap cuts content.
/// WinAnsi-representable, so the writer encodes it directly.
pub const ELLIPSIS: char = '\u{2026}';

/// Replace characters the standard fonts cannot represent with safe
/// ASCII equivalents.
///
/// NFKD-decomposes, drops combining marks, then applies a fixed
/// replacement table for common fancy punctuation. Everything else at
/// U+0100 and above becomes `?` — a deliberately coarse catch-all, kept
/// as-is rather than extended into a full transliteration.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            // Hyphen variants: U+2010 hyphen through U+2015 horizontal bar
            '\u{2010}'..='\u{2015}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' | '\u{2219}' | '\u{00B7}' => out.push('*'),
            '\u{2016}' | '\u{00A6}' => out.push('|'),
            '\u{2260}' | '\u{2248}' | '\u{2264}' | '\u{2265}' | '\u{00B1}' => out.push('~'),
            '\u{2020}' | '\u{2021}' | '\u{00A7}' | '\u{00B6}' => {}
            ch if (ch as u32) >= 0x0100 => out.push('?'),
            ch => out.push(ch),
        }
    }
    out
}

/// Split text into tokens, keeping separators as their own tokens so
/// concatenating the tokens reproduces the input exactly. Separators are
/// whitespace runs, `/`, and `-` (dash variants are already folded to
/// `-` by `sanitize`).
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut space = String::new();
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            space.push(ch);
        } else {
            if !space.is_empty() {
                tokens.push(std::mem::take(&mut space));
            }
            if ch == '/' || ch == '-' {
                if !word.is_empty() {
                    tokens.push(std::mem::take(&mut word));
                }
                tokens.push(ch.to_string());
            } else {
                word.push(ch);
            }
        }
    }
    if !space.is_empty() {
        tokens.push(space);
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

/// Break `text` into lines no wider than `limit` points.
///
/// Greedy: tokens accumulate onto the current line until the next one
/// would overflow, then the line is flushed. A token that alone exceeds
/// `limit` is split character-by-character across as many lines as
/// needed; no character is ever dropped. The only line that may exceed
/// `limit` is a single glyph whose advance alone is wider than `limit`.
///
/// With `max_lines`, overflowing content is cut at exactly that many
/// lines and the last line is refilled so that it still fits `limit`
/// with the `…` marker appended.
///
/// Callers must pass `limit > 0`; the table engine floors its cell
/// budget at 10pt before calling.
pub fn wrap(
    fonts: &FontContext,
    text: &str,
    limit: f64,
    variant: FontVariant,
    font_size: f64,
    max_lines: Option<usize>,
) -> Vec<String> {
    let clean = sanitize(text);
    let width = |s: &str| fonts.measure(s, variant, font_size);

    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();

    for tok in tokenize(&clean) {
        let attempt = if cur.is_empty() {
            tok.clone()
        } else {
            let mut a = cur.clone();
            a.push_str(&tok);
            a
        };
        if width(&attempt) <= limit {
            cur = attempt;
            continue;
        }
        if cur.is_empty() {
            cur = split_token_chars(&tok, limit, &width, &mut lines);
        } else {
            lines.push(std::mem::take(&mut cur));
            if width(&tok) > limit {
                cur = split_token_chars(&tok, limit, &width, &mut lines);
            } else {
                cur = tok;
            }
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    if let Some(cap) = max_lines {
        truncate_to_cap(fonts, &mut lines, cap.max(1), limit, variant, font_size);
    }
    lines
}

/// Tier-2 fallback: split a single over-wide token character-by-character.
/// Completed pieces go into `lines`; the trailing remainder is returned
/// so following tokens can continue on the same line.
fn split_token_chars(
    token: &str,
    limit: f64,
    width: &dyn Fn(&str) -> f64,
    lines: &mut Vec<String>,
) -> String {
    let mut piece = String::new();
    for ch in token.chars() {
        let mut test = piece.clone();
        test.push(ch);
        if !piece.is_empty() && width(&test) > limit {
            lines.push(piece);
            piece = ch.to_string();
        } else {
            piece = test;
        }
    }
    piece
}

/// Enforce a `max_lines` cap: keep the first `cap - 1` lines and refill
/// the last permitted line from the remaining text so it ends with the
/// ellipsis marker and still fits `limit`.
fn truncate_to_cap(
    fonts: &FontContext,
    lines: &mut Vec<String>,
    cap: usize,
    limit: f64,
    variant: FontVariant,
    font_size: f64,
) {
    if lines.len() <= cap {
        return;
    }
    let remaining: String = lines.split_off(cap - 1).concat();
    let marker_width = fonts.char_width(ELLIPSIS, variant, font_size);
    let mut last = String::new();
    for ch in remaining.chars() {
        let mut test = last.clone();
        test.push(ch);
        if fonts.measure(&test, variant, font_size) + marker_width > limit {
            break;
        }
        last = test;
    }
    last.push(ELLIPSIS);
    lines.push(last);
}
