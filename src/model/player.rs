use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A seat in one game, not a global user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub account_id: Option<String>,
    pub name: String,
    /// Handicap captured when the game was created.
    #[serde(default)]
    pub handicap: f64,
    pub position: u32,
    /// First hole this player's bets cover; later than 1 only after a late join.
    #[serde(default = "first_hole")]
    pub start_hole: u8,
}

fn first_hole() -> u8 {
    1
}
