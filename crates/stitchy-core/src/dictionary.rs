//! Crochet abbreviation reference data (US terminology).
//!
//! Static, read-only. [`Dictionary`] wraps the entry table with a
//! case-insensitive map keyed by both the short code and the expanded
//! phrase, so lookups are O(1) instead of a table scan.

use std::collections::HashMap;

use serde::Serialize;

/// Classification tag for an abbreviation. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Modify,
    Start,
    Modifier,
    Finish,
    Colorwork,
    Phrase,
}

/// One entry of the abbreviation table.
///
/// `stitch_change` is the signed per-occurrence stitch delta; entries
/// without a meaningful delta (MR, FLO, ...) omit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Abbreviation {
    pub abbr: &'static str,
    pub full: &'static str,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stitch_change: Option<i32>,
}

const fn entry(
    abbr: &'static str,
    full: &'static str,
    category: Category,
    stitch_change: Option<i32>,
) -> Abbreviation {
    Abbreviation {
        abbr,
        full,
        category,
        stitch_change,
    }
}

const ENTRIES: &[Abbreviation] = &[
    // Basic stitches
    entry("ch", "chain", Category::Basic, Some(0)),
    entry("sl st", "slip stitch", Category::Basic, Some(0)),
    entry("sc", "single crochet", Category::Basic, Some(0)),
    entry("hdc", "half double crochet", Category::Basic, Some(0)),
    entry("dc", "double crochet", Category::Basic, Some(0)),
    entry("tr", "treble crochet", Category::Basic, Some(0)),
    entry("dtr", "double treble crochet", Category::Basic, Some(0)),
    // Increases/decreases
    entry("inc", "increase", Category::Modify, Some(1)),
    entry("dec", "decrease", Category::Modify, Some(-1)),
    entry("invdec", "invisible decrease", Category::Modify, Some(-1)),
    entry(
        "sc2tog",
        "single crochet two together",
        Category::Modify,
        Some(-1),
    ),
    // Special techniques
    entry("MR", "magic ring", Category::Start, None),
    entry("FLO", "front loop only", Category::Modifier, None),
    entry("BLO", "back loop only", Category::Modifier, None),
    entry("BL", "back loop", Category::Modifier, None),
    entry("FL", "front loop", Category::Modifier, None),
    entry("inv fo", "invisible fasten off", Category::Finish, None),
    entry("change color", "change color", Category::Colorwork, None),
    // Common phrases
    entry("st", "stitch", Category::Phrase, None),
    entry("sts", "stitches", Category::Phrase, None),
    entry("rep", "repeat", Category::Phrase, None),
    entry("rnd", "round", Category::Phrase, None),
    entry("tog", "together", Category::Phrase, None),
    entry("in", "in", Category::Phrase, None),
    entry("each", "each", Category::Phrase, None),
];

/// Case-insensitive lookup over the static abbreviation table.
#[derive(Debug)]
pub struct Dictionary {
    by_key: HashMap<String, &'static Abbreviation>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        let mut by_key = HashMap::with_capacity(ENTRIES.len() * 2);
        for abbreviation in ENTRIES {
            by_key.insert(abbreviation.abbr.to_lowercase(), abbreviation);
            by_key.insert(abbreviation.full.to_lowercase(), abbreviation);
        }
        Self { by_key }
    }

    /// The full static entry table, in definition order.
    #[must_use]
    pub const fn entries() -> &'static [Abbreviation] {
        ENTRIES
    }

    /// Match `text` against either the short code or the expanded
    /// phrase, case-insensitively.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<&'static Abbreviation> {
        self.by_key.get(&text.to_lowercase()).copied()
    }

    /// Per-occurrence stitch delta for `text`; 0 for unknown or
    /// delta-less entries.
    #[must_use]
    pub fn stitch_delta(&self, text: &str) -> i32 {
        self.lookup(text)
            .and_then(|abbreviation| abbreviation.stitch_change)
            .unwrap_or(0)
    }

    /// All entries carrying the given category tag.
    pub fn by_category(category: Category) -> impl Iterator<Item = &'static Abbreviation> {
        ENTRIES
            .iter()
            .filter(move |abbreviation| abbreviation.category == category)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// A yarn color reference entry: display name plus hex swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YarnColor {
    pub name: &'static str,
    pub hex: &'static str,
}

const fn color(name: &'static str, hex: &'static str) -> YarnColor {
    YarnColor { name, hex }
}

/// Common yarn colors, grouped by color family. Components store the
/// color as a free string; this list only feeds pickers and hints.
pub const YARN_COLORS: &[YarnColor] = &[
    // Neutrals & whites
    color("White", "#FFFFFF"),
    color("Cream", "#FFFDD0"),
    color("Beige", "#F5F5DC"),
    color("Tan", "#D2B48C"),
    color("Light Gray", "#D3D3D3"),
    color("Gray", "#808080"),
    color("Brown", "#8B4513"),
    color("Black", "#000000"),
    // Pinks
    color("Light Pink", "#FFB6C1"),
    color("Pink", "#FFC0CB"),
    color("Hot Pink", "#FF69B4"),
    color("Rose", "#FF007F"),
    // Reds
    color("Red", "#FF0000"),
    color("Burgundy", "#800020"),
    // Oranges
    color("Peach", "#FFE5B4"),
    color("Coral", "#FF7F50"),
    color("Orange", "#FFA500"),
    // Yellows
    color("Yellow", "#FFFF00"),
    color("Gold", "#FFD700"),
    color("Mustard", "#FFDB58"),
    // Greens
    color("Light Green", "#90EE90"),
    color("Mint", "#98FF98"),
    color("Sage", "#87AE73"),
    color("Green", "#008000"),
    color("Forest Green", "#228B22"),
    color("Dark Green", "#006400"),
    color("Olive", "#808000"),
    // Blues
    color("Light Blue", "#ADD8E6"),
    color("Sky Blue", "#87CEEB"),
    color("Turquoise", "#40E0D0"),
    color("Teal", "#008080"),
    color("Blue", "#0000FF"),
    color("Navy", "#000080"),
    // Purples
    color("Lavender", "#E6E6FA"),
    color("Purple", "#800080"),
    color("Violet", "#8F00FF"),
    color("Plum", "#8E4585"),
];

/// Hook size labels (metric with US letter/number equivalents).
pub const HOOK_SIZES: &[&str] = &[
    "2.0mm (B/1)",
    "2.25mm (B/1)",
    "2.5mm (C/2)",
    "2.75mm (C/2)",
    "3.0mm (D/3)",
    "3.25mm (D/3)",
    "3.5mm (E/4)",
    "3.75mm (F/5)",
    "4.0mm (G/6)",
    "4.5mm (7)",
    "5.0mm (H/8)",
    "5.5mm (I/9)",
    "6.0mm (J/10)",
    "6.5mm (K/10.5)",
    "8.0mm (L/11)",
    "9.0mm (M/13)",
    "10.0mm (N/15)",
    "12.0mm (P/16)",
    "15.0mm (Q)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_abbr_and_full_case_insensitively() {
        let dictionary = Dictionary::new();
        assert_eq!(dictionary.lookup("SC").map(|a| a.full), Some("single crochet"));
        assert_eq!(dictionary.lookup("Single Crochet").map(|a| a.abbr), Some("sc"));
        assert_eq!(dictionary.lookup("mr").map(|a| a.full), Some("magic ring"));
        assert!(dictionary.lookup("frobnicate").is_none());
    }

    #[test]
    fn stitch_delta_defaults_to_zero() {
        let dictionary = Dictionary::new();
        assert_eq!(dictionary.stitch_delta("inc"), 1);
        assert_eq!(dictionary.stitch_delta("dec"), -1);
        assert_eq!(dictionary.stitch_delta("invdec"), -1);
        assert_eq!(dictionary.stitch_delta("sc2tog"), -1);
        assert_eq!(dictionary.stitch_delta("sc"), 0);
        // No delta recorded for MR, and unknown text is 0 too.
        assert_eq!(dictionary.stitch_delta("MR"), 0);
        assert_eq!(dictionary.stitch_delta("nonsense"), 0);
    }

    #[test]
    fn category_filter_returns_modify_entries() {
        let modifies: Vec<_> = Dictionary::by_category(Category::Modify)
            .map(|a| a.abbr)
            .collect();
        assert_eq!(modifies, vec!["inc", "dec", "invdec", "sc2tog"]);
    }

    #[test]
    fn reference_lists_are_not_empty() {
        assert!(YARN_COLORS.iter().any(|c| c.name == "White"));
        assert!(HOOK_SIZES.contains(&"3.5mm (E/4)"));
    }
}
