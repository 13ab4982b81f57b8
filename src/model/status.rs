use serde::{Deserialize, Serialize};

use crate::model::bet::{BetId, BetRegion};
use crate::model::player::PlayerId;
use crate::model::settings::{Cents, MatchType};
use crate::model::wolf_choice::WolfCall;

/// Live projection of a game, tagged by format.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveStatus {
    Nassau(NassauStatus),
    Skins(SkinsStatus),
    MatchPlay(MatchPlayStatus),
    Wolf(WolfStatus),
}

impl LiveStatus {
    #[must_use]
    pub fn progress(&self) -> &RoundProgress {
        match self {
            LiveStatus::Nassau(s) => &s.progress,
            LiveStatus::Skins(s) => &s.progress,
            LiveStatus::MatchPlay(s) => &s.progress,
            LiveStatus::Wolf(s) => &s.progress,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundProgress {
    pub current_hole: u8,
    /// Holes every player has a score on.
    pub holes_completed: u8,
    pub hole_count: u8,
    pub round_complete: bool,
}

// ---- nassau ----

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BetState {
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BetStanding {
    pub bet_id: BetId,
    pub label: String,
    pub region: BetRegion,
    pub parent_id: Option<BetId>,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub start_hole: u8,
    pub end_hole: u8,
    pub holes_played: u8,
    pub holes_won_a: u8,
    pub holes_won_b: u8,
    /// Positive when `player_a` is ahead.
    pub margin: i32,
    pub leader: Option<PlayerId>,
    pub state: BetState,
    pub summary: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SuggestedPress {
    /// The bet that would be pressed.
    pub bet_id: BetId,
    pub region: BetRegion,
    pub pressing_player: PlayerId,
    pub opponent: PlayerId,
    pub start_hole: u8,
    pub holes_down: u8,
    pub reason: String,
    /// Set when the game auto-presses; the caller still creates the press.
    pub automatic: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NassauPair {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub bets: Vec<BetStanding>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NassauStatus {
    pub progress: RoundProgress,
    pub pairs: Vec<NassauPair>,
    pub suggested_presses: Vec<SuggestedPress>,
}

// ---- skins ----

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SkinOutcome {
    Won {
        player_id: PlayerId,
        skins: u32,
        value: Cents,
    },
    Carried {
        carried_skins: u32,
    },
    Voided {
        value: Cents,
    },
    Split {
        player_ids: Vec<PlayerId>,
        skins: u32,
        value: Cents,
    },
    Forfeited {
        skins: u32,
        value: Cents,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinHole {
    pub hole: u8,
    pub low_net: u8,
    pub outcome: SkinOutcome,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinsTally {
    pub player_id: PlayerId,
    pub skins_won: u32,
    pub winnings: Cents,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinsStatus {
    pub progress: RoundProgress,
    pub holes: Vec<SkinHole>,
    pub players: Vec<SkinsTally>,
    pub carryover: u32,
    pub value_at_stake: Cents,
    pub paid_out: Cents,
    pub forfeited: Cents,
}

// ---- match play ----

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    InProgress,
    Dormie,
    Decided,
    Finished,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchStanding {
    pub bet_id: BetId,
    pub side_a: Vec<PlayerId>,
    pub side_b: Vec<PlayerId>,
    pub holes_played: u8,
    pub holes_remaining: u8,
    /// Positive when side A is ahead.
    pub margin: i32,
    pub leader: Option<PlayerId>,
    pub is_dormie: bool,
    pub state: MatchState,
    pub closed_on_hole: Option<u8>,
    pub result: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchPlayStatus {
    pub progress: RoundProgress,
    pub match_type: MatchType,
    pub matches: Vec<MatchStanding>,
}

// ---- wolf ----

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WolfHoleWinner {
    Wolf,
    Field,
    Push,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PointDelta {
    pub player_id: PlayerId,
    pub points: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfHole {
    pub hole: u8,
    pub wolf_player: PlayerId,
    pub choice: WolfCall,
    pub wolf_side: Vec<PlayerId>,
    pub field_side: Vec<PlayerId>,
    pub wolf_net: u8,
    pub field_net: u8,
    pub multiplier: i64,
    pub winner: WolfHoleWinner,
    pub points: Vec<PointDelta>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfTally {
    pub player_id: PlayerId,
    pub points: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfStatus {
    pub progress: RoundProgress,
    pub holes: Vec<WolfHole>,
    pub standings: Vec<WolfTally>,
    /// First hole that still needs the wolf's call, with its wolf.
    pub awaiting_choice: Option<(u8, PlayerId)>,
}
