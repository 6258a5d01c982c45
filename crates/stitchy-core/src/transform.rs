//! Display-time instruction rewriting.
//!
//! Instructions are stored in canonical abbreviated form; these
//! functions rewrite free text between abbreviations and full stitch
//! names for rendering and input normalization. Substitution is
//! whole-word and longest-match-first so multi-word entries like
//! `"sl st"` are handled as a unit before `"st"` alone, and matching is
//! case-insensitive while replacement text comes from the dictionary.

use crate::dictionary::{Abbreviation, Dictionary};

/// Expand abbreviations into full stitch names, for display.
#[must_use]
pub fn to_full_text(text: &str) -> String {
    let mut entries: Vec<&Abbreviation> = Dictionary::entries().iter().collect();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.abbr.len()));
    let mut out = text.to_string();
    for entry in entries {
        out = replace_whole_word(&out, entry.abbr, entry.full);
    }
    out
}

/// Collapse full stitch names back into canonical abbreviations, for
/// storage.
#[must_use]
pub fn to_abbreviations(text: &str) -> String {
    let mut entries: Vec<&Abbreviation> = Dictionary::entries().iter().collect();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.full.len()));
    let mut out = text.to_string();
    for entry in entries {
        out = replace_whole_word(&out, entry.full, entry.abbr);
    }
    out
}

/// Pick the rendering for `text` given the user's display preference.
#[must_use]
pub fn display_text(text: &str, show_full_text: bool) -> String {
    if show_full_text {
        to_full_text(text)
    } else {
        text.to_string()
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Replace every whole-word, case-insensitive occurrence of `needle`
/// in `haystack` with `replacement`. A match is whole-word when the
/// bytes on both sides are non-word characters or the text edge.
fn replace_whole_word(haystack: &str, needle: &str, replacement: &str) -> String {
    let hay = haystack.as_bytes();
    let ndl = needle.as_bytes();
    if ndl.is_empty() || hay.len() < ndl.len() {
        return haystack.to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let mut at = 0;
    while at + ndl.len() <= hay.len() {
        let window = &hay[at..at + ndl.len()];
        let word_start = at == 0 || !is_word_byte(hay[at - 1]);
        let word_end =
            at + ndl.len() == hay.len() || !is_word_byte(hay[at + ndl.len()]);
        if word_start && word_end && window.eq_ignore_ascii_case(ndl) {
            out.push_str(replacement);
            at += ndl.len();
        } else {
            // Only advance on char boundaries so multibyte text passes
            // through untouched.
            let step = (1..=4)
                .find(|&n| haystack.is_char_boundary(at + n))
                .unwrap_or(1);
            out.push_str(&haystack[at..at + step]);
            at += step;
        }
    }
    out.push_str(&haystack[at..]);
    out
}
