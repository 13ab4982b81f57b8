use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::player::PlayerId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BetId(pub String);

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BetRegion {
    Front,
    Back,
    Overall,
    Match,
}

impl BetRegion {
    pub const NASSAU: [BetRegion; 3] = [BetRegion::Front, BetRegion::Back, BetRegion::Overall];

    /// Display label; the nine-hole split only reads "Front 9" on an 18 hole card.
    #[must_use]
    pub fn label(self, hole_count: u8) -> &'static str {
        match (self, hole_count) {
            (BetRegion::Front, 18) => "Front 9",
            (BetRegion::Back, 18) => "Back 9",
            (BetRegion::Front, _) => "Front",
            (BetRegion::Back, _) => "Back",
            (BetRegion::Overall, _) => "Overall",
            (BetRegion::Match, _) => "Match",
        }
    }
}

/// A wager opened when the game starts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParentBet {
    pub id: BetId,
    pub region: BetRegion,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    /// Stake in dollars.
    pub amount: f64,
}

/// A derivative wager opened mid-round against a parent (or another press).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Press {
    pub id: BetId,
    pub parent_id: BetId,
    pub region: BetRegion,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub amount: f64,
    pub start_hole: u8,
    /// Margin of the pressed bet from `player_a`'s side when the press was made.
    pub margin_at_press: i32,
    pub pressed_by: PlayerId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bet {
    Parent(ParentBet),
    Press(Press),
}

impl Bet {
    #[must_use]
    pub fn id(&self) -> &BetId {
        match self {
            Bet::Parent(bet) => &bet.id,
            Bet::Press(press) => &press.id,
        }
    }

    #[must_use]
    pub fn region(&self) -> BetRegion {
        match self {
            Bet::Parent(bet) => bet.region,
            Bet::Press(press) => press.region,
        }
    }

    #[must_use]
    pub fn players(&self) -> (&PlayerId, &PlayerId) {
        match self {
            Bet::Parent(bet) => (&bet.player_a, &bet.player_b),
            Bet::Press(press) => (&press.player_a, &press.player_b),
        }
    }

    #[must_use]
    pub fn amount(&self) -> f64 {
        match self {
            Bet::Parent(bet) => bet.amount,
            Bet::Press(press) => press.amount,
        }
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<&BetId> {
        match self {
            Bet::Parent(_) => None,
            Bet::Press(press) => Some(&press.parent_id),
        }
    }

    #[must_use]
    pub fn is_press(&self) -> bool {
        matches!(self, Bet::Press(_))
    }
}
