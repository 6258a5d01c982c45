//! Round instruction parsing.
//!
//! Derives the stitch count of a round from its written crochet
//! notation plus the previous round's count. The grammar is loose on
//! purpose: patterns in the wild disagree on spacing and phrasing, so
//! each rule tolerates flexible whitespace and matches anywhere in the
//! text unless noted. Recognition is ordered most-specific-first, and
//! anything unrecognized falls back to the previous count rather than
//! failing. The caller can always override the derived count manually.

/// Which rule matched an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognition {
    /// `"6 sc in MR"` / `"6 sc in magic ring"` - foundation round.
    MagicRing,
    /// `"inc in each st"` - doubles the previous count.
    UniformIncrease,
    /// `"dec ... around"` / `"dec ... all"` - halves the previous count.
    UniformDecrease,
    /// `"(sc, inc) x 6"` or `"[sc, inc] x 6"` - net inc/dec per repeat.
    RepeatGroup,
    /// `"12 sc"` - explicit count up front.
    ExplicitCount,
    /// `"sc around"` - work even, count unchanged.
    WorkEven,
    /// `"sc 12"` - count trailing the stitch name.
    TrailingCount,
    Unrecognized,
}

impl Recognition {
    /// Short human-readable explanation, for the `parse` command's
    /// output and for debugging patterns that derive surprising counts.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::MagicRing => "starting with magic ring",
            Self::UniformIncrease => "doubling stitch count (increase in each stitch)",
            Self::UniformDecrease => "halving stitch count (decrease around)",
            Self::RepeatGroup => "pattern repeat detected",
            Self::ExplicitCount => "explicit stitch count",
            Self::WorkEven => "working around (no change)",
            Self::TrailingCount => "stitch count after stitch name",
            Self::Unrecognized => "unable to auto-calculate (using previous count)",
        }
    }
}

/// Stitch names that carry a count in the explicit-count rules.
const COUNTED_STITCHES: &[&str] = &["sc", "hdc", "dc", "tr"];

/// Derive the stitch count for a round.
///
/// Never fails: blank or unrecognized instructions return `previous`.
#[must_use]
pub fn derive_stitch_count(instruction: &str, previous: u32) -> u32 {
    recognize(instruction, previous).1
}

/// Whether any recognition rule applies to `instruction`.
#[must_use]
pub fn can_parse(instruction: &str) -> bool {
    recognize(instruction, 0).0 != Recognition::Unrecognized
}

/// Run the recognition rules in order and return the first hit along
/// with its derived count.
#[must_use]
pub fn recognize(instruction: &str, previous: u32) -> (Recognition, u32) {
    let text = instruction.trim().to_lowercase();
    if text.is_empty() {
        return (Recognition::Unrecognized, previous);
    }

    if let Some(count) = match_magic_ring(&text) {
        return (Recognition::MagicRing, count);
    }
    if matches_uniform_increase(&text) {
        return (Recognition::UniformIncrease, previous.saturating_mul(2));
    }
    if matches_uniform_decrease(&text) {
        return (Recognition::UniformDecrease, previous / 2);
    }
    if let Some(count) = match_repeat_group(&text, previous, '(', ')')
        .or_else(|| match_repeat_group(&text, previous, '[', ']'))
    {
        return (Recognition::RepeatGroup, count);
    }
    if let Some(count) = match_leading_count(&text) {
        return (Recognition::ExplicitCount, count);
    }
    if matches_plain_around(&text) {
        return (Recognition::WorkEven, previous);
    }
    if let Some(count) = match_trailing_count(&text) {
        return (Recognition::TrailingCount, count);
    }

    (Recognition::Unrecognized, previous)
}

/// Leading decimal run of `s`, saturating on overflow. Returns the
/// parsed value and the run's byte length.
fn eat_number(s: &str) -> Option<(u32, usize)> {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let value = s[..len]
        .bytes()
        .fold(0_u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });
    Some((value, len))
}

fn skip_ws(s: &str) -> &str {
    s.trim_start()
}

fn eat_prefix<'a>(s: &'a str, token: &str) -> Option<&'a str> {
    s.strip_prefix(token)
}

/// `"<N> sc in mr"` / `"<N> sc in magic ring"`, anywhere in the text.
fn match_magic_ring(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        // Only digit-run starts; a mid-run start has the same tail and
        // would have failed already.
        if start > 0 && bytes[start - 1].is_ascii_digit() {
            continue;
        }
        let (count, len) = eat_number(&text[start..])?;
        let rest = skip_ws(&text[start + len..]);
        let Some(rest) = eat_prefix(rest, "sc") else {
            continue;
        };
        let rest = skip_ws(rest);
        let Some(rest) = eat_prefix(rest, "in") else {
            continue;
        };
        let rest = skip_ws(rest);
        if eat_prefix(rest, "mr").is_some() {
            return Some(count);
        }
        if let Some(rest) = eat_prefix(rest, "magic") {
            if eat_prefix(skip_ws(rest), "ring").is_some() {
                return Some(count);
            }
        }
    }
    None
}

/// `"inc in each"`, with at least one space between the words.
fn matches_uniform_increase(text: &str) -> bool {
    let mut rest = text;
    while let Some(start) = rest.find("inc") {
        let after = &rest[start + 3..];
        let trimmed = skip_ws(after);
        if trimmed.len() < after.len() {
            if let Some(tail) = eat_prefix(trimmed, "in") {
                let trimmed = skip_ws(tail);
                if trimmed.len() < tail.len() && trimmed.starts_with("each") {
                    return true;
                }
            }
        }
        rest = &rest[start + 1..];
    }
    false
}

/// `"dec"` with `"around"` or `"all"` somewhere after it.
fn matches_uniform_decrease(text: &str) -> bool {
    text.find("dec").is_some_and(|at| {
        let tail = &text[at + 3..];
        tail.contains("around") || tail.contains("all")
    })
}

/// `"(<sequence>)"` (or brackets) followed by `x? <N>`. The net
/// inc/dec delta of the sequence is applied `N` times to `previous`,
/// floored at zero.
///
/// Substring counting means `invdec` registers as a decrease, which is
/// the intended reading of patterns like `"(4 sc, invdec) x 6"`.
fn match_repeat_group(text: &str, previous: u32, open: char, close: char) -> Option<u32> {
    for (group_start, c) in text.char_indices() {
        if c != open {
            continue;
        }
        let inner_start = group_start + open.len_utf8();
        // Shortest group first; a close without the repeat suffix lets
        // the group widen past it.
        for (offset, d) in text[inner_start..].char_indices() {
            if d != close {
                continue;
            }
            let sequence = &text[inner_start..inner_start + offset];
            let after = &text[inner_start + offset + close.len_utf8()..];
            let Some(repeats) = repeat_suffix(after) else {
                continue;
            };
            let increases = sequence.matches("inc").count();
            let decreases = sequence.matches("dec").count();
            let delta = i64::try_from(increases).unwrap_or(i64::MAX)
                - i64::try_from(decreases).unwrap_or(i64::MAX);
            let result = i64::from(previous) + delta * i64::from(repeats);
            return Some(u32::try_from(result.max(0)).unwrap_or(u32::MAX));
        }
    }
    None
}

/// The `x? <N>` tail after a repeat group's closing delimiter.
fn repeat_suffix(after: &str) -> Option<u32> {
    let rest = skip_ws(after);
    let rest = eat_prefix(rest, "x").unwrap_or(rest);
    let rest = skip_ws(rest);
    eat_number(rest).map(|(repeats, _)| repeats)
}

/// `"<N> sc"` style: a count at the very start, then a stitch name.
fn match_leading_count(text: &str) -> Option<u32> {
    let (count, len) = eat_number(text)?;
    let rest = skip_ws(&text[len..]);
    COUNTED_STITCHES
        .iter()
        .any(|stitch| rest.starts_with(stitch))
        .then_some(count)
}

/// A stitch name with `"around"` somewhere after it.
fn matches_plain_around(text: &str) -> bool {
    text.rfind("around").is_some_and(|at| {
        let head = &text[..at];
        COUNTED_STITCHES.iter().any(|stitch| head.contains(stitch))
    })
}

/// `"sc 12"` style: a stitch name, whitespace, then the count. The
/// leftmost such pair wins.
fn match_trailing_count(text: &str) -> Option<u32> {
    for start in 0..text.len() {
        if !text.is_char_boundary(start) {
            continue;
        }
        for stitch in COUNTED_STITCHES {
            let Some(after) = eat_prefix(&text[start..], stitch) else {
                continue;
            };
            let trimmed = skip_ws(after);
            if trimmed.len() == after.len() {
                continue;
            }
            if let Some((count, _)) = eat_number(trimmed) {
                return Some(count);
            }
        }
    }
    None
}
