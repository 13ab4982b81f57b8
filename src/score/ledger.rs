use ahash::RandomState;
use std::collections::HashMap;

use crate::model::{PlayerId, Score};

/// Stroke records keyed by `(player, hole)`; a repeated key keeps the last row.
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    strokes: HashMap<(PlayerId, u8), u8, RandomState>,
    last_hole: u8,
}

impl ScoreLedger {
    #[must_use]
    pub fn from_scores(scores: &[Score]) -> Self {
        let mut ledger = Self::default();
        for score in scores {
            ledger.upsert(score);
        }
        ledger
    }

    pub fn upsert(&mut self, score: &Score) {
        self.strokes
            .insert((score.player_id.clone(), score.hole), score.strokes);
        self.last_hole = self.last_hole.max(score.hole);
    }

    #[must_use]
    pub fn gross(&self, player: &PlayerId, hole: u8) -> Option<u8> {
        self.strokes.get(&(player.clone(), hole)).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Highest hole anyone has a score on, 0 when nothing is entered.
    #[must_use]
    pub fn last_hole(&self) -> u8 {
        self.last_hole
    }

    #[must_use]
    pub fn hole_complete<'a>(
        &self,
        players: impl IntoIterator<Item = &'a PlayerId>,
        hole: u8,
    ) -> bool {
        players
            .into_iter()
            .all(|player| self.gross(player, hole).is_some())
    }

    #[must_use]
    pub fn any_score_from(&self, hole: u8) -> bool {
        self.strokes.keys().any(|(_, h)| *h >= hole)
    }

    #[must_use]
    pub fn any_score_on(&self, hole: u8) -> bool {
        self.strokes.keys().any(|(_, h)| *h == hole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(player: &str, hole: u8, strokes: u8) -> Score {
        Score {
            player_id: player.into(),
            hole,
            strokes,
        }
    }

    #[test]
    fn later_rows_overwrite_earlier_ones() {
        let ledger = ScoreLedger::from_scores(&[score("a", 1, 5), score("a", 1, 4)]);
        assert_eq!(ledger.gross(&"a".into(), 1), Some(4));
        assert_eq!(ledger.last_hole(), 1);
    }

    #[test]
    fn hole_complete_needs_every_player() {
        let ledger = ScoreLedger::from_scores(&[score("a", 2, 5), score("b", 2, 6)]);
        let a: PlayerId = "a".into();
        let b: PlayerId = "b".into();
        let c: PlayerId = "c".into();
        assert!(ledger.hole_complete([&a, &b], 2));
        assert!(!ledger.hole_complete([&a, &b, &c], 2));
        assert!(ledger.any_score_from(2));
        assert!(!ledger.any_score_from(3));
    }
}
