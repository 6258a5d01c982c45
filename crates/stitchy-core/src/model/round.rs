use serde::{Deserialize, Serialize};

/// One row of stitches in circular crochet.
///
/// `round_number` is the 1-based position within the parent component
/// and always equals `index + 1`; `stitch_count` is the total number of
/// stitches present after this round is worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub round_number: u32,
    /// Crochet notation, stored in canonical abbreviated form.
    pub instruction: String,
    #[serde(default)]
    pub stitch_count: u32,
}

impl Round {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        round_number: u32,
        instruction: impl Into<String>,
        stitch_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            round_number,
            instruction: instruction.into(),
            stitch_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let round = Round::new("r1", 1, "6 sc in MR", 6);
        let json = serde_json::to_string(&round).expect("serialize");
        assert!(json.contains("roundNumber"));
        assert!(json.contains("stitchCount"));
        let back: Round = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, round);
    }
}
