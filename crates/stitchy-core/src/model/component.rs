use serde::{Deserialize, Serialize};

use super::Round;

/// One crocheted piece of a project (head, arm, ...), possibly needed
/// in multiple physical copies.
///
/// Invariants maintained by the reducer:
/// - `0 <= completed_count <= quantity`
/// - `rounds[i].round_number == i + 1` for every index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub completed_count: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hook: String,
    /// 1-based number of the round being actively worked; 0 means not
    /// started. Not re-validated against `rounds.len()`.
    #[serde(default)]
    pub current_round: usize,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

const fn default_quantity() -> u32 {
    1
}

impl Component {
    /// Create a fresh component with no rounds and nothing completed.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        color: impl Into<String>,
        hook: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: quantity.max(1),
            completed_count: 0,
            color: color.into(),
            hook: hook.into(),
            current_round: 0,
            rounds: Vec::new(),
        }
    }

    /// Look up a round by id.
    #[must_use]
    pub fn round(&self, round_id: &str) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == round_id)
    }

    /// Stitch count after the last recorded round, or 0 for a fresh piece.
    #[must_use]
    pub fn last_stitch_count(&self) -> u32 {
        self.rounds.last().map_or(0, |r| r.stitch_count)
    }

    /// Restore the sequential `round_number == index + 1` invariant.
    pub fn renumber_rounds(&mut self) {
        for (index, round) in self.rounds.iter_mut().enumerate() {
            round.round_number = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);
        }
    }

    /// Clamp `completed_count` back into `[0, quantity]` after a
    /// wholesale quantity update.
    pub fn clamp_completion(&mut self) {
        self.completed_count = self.completed_count.min(self.quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_component_starts_untouched() {
        let component = Component::new("c1", "Head", 2, "White", "3.5mm (E/4)");
        assert_eq!(component.completed_count, 0);
        assert_eq!(component.current_round, 0);
        assert!(component.rounds.is_empty());
    }

    #[test]
    fn zero_quantity_is_bumped_to_one() {
        let component = Component::new("c1", "Head", 0, "White", "3.5mm (E/4)");
        assert_eq!(component.quantity, 1);
    }

    #[test]
    fn renumber_restores_sequence() {
        let mut component = Component::new("c1", "Head", 1, "White", "3.5mm (E/4)");
        component.rounds = vec![
            Round::new("r2", 2, "(sc, inc) x 6", 12),
            Round::new("r3", 3, "sc around", 12),
        ];
        component.renumber_rounds();
        assert_eq!(component.rounds[0].round_number, 1);
        assert_eq!(component.rounds[1].round_number, 2);
    }

    #[test]
    fn clamp_pulls_completion_down_to_quantity() {
        let mut component = Component::new("c1", "Arm", 4, "Pink", "3.0mm (D/3)");
        component.completed_count = 4;
        component.quantity = 2;
        component.clamp_completion();
        assert_eq!(component.completed_count, 2);
    }
}
