use serde::{Deserialize, Serialize};

use crate::model::player::PlayerId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub player_id: PlayerId,
    pub hole: u8,
    pub strokes: u8,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    #[default]
    InProgress,
    Completed,
    EndedEarly,
}

impl RoundState {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, RoundState::InProgress)
    }
}
