#![allow(dead_code)]

use rusty_golf_games::model::{GameSnapshot, Score, Settlement};

pub const NASSAU: &str = include_str!("../fixtures/nassau_two_player.json");
pub const SKINS: &str = include_str!("../fixtures/skins_four_player.json");
pub const MATCH_SINGLES: &str = include_str!("../fixtures/match_play_singles.json");
pub const MATCH_TEAMS: &str = include_str!("../fixtures/match_play_teams.json");
pub const WOLF: &str = include_str!("../fixtures/wolf_four_player.json");

pub fn load(fixture: &str) -> Result<GameSnapshot, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(fixture)?)
}

/// Scores for consecutive holes starting at hole 1.
pub fn card(player: &str, strokes: &[u8]) -> Vec<Score> {
    strokes
        .iter()
        .enumerate()
        .map(|(idx, strokes)| Score {
            player_id: player.into(),
            hole: idx as u8 + 1,
            strokes: *strokes,
        })
        .collect()
}

/// One hole for a list of (player, strokes).
pub fn hole(hole: u8, strokes: &[(&str, u8)]) -> Vec<Score> {
    strokes
        .iter()
        .map(|(player, strokes)| Score {
            player_id: (*player).into(),
            hole,
            strokes: *strokes,
        })
        .collect()
}

/// Every transfer is positive, between two players, and its breakdown adds up.
pub fn assert_well_formed(settlements: &[Settlement]) {
    for s in settlements {
        assert!(s.amount > 0, "non-positive transfer {s:?}");
        assert_ne!(s.from_player, s.to_player);
        let lines: i64 = s.breakdown.iter().map(|l| l.amount).sum();
        assert_eq!(lines, s.amount, "breakdown does not add up for {s:?}");
    }
}
