use serde::{Deserialize, Serialize};

use crate::model::bet::Bet;
use crate::model::player::Player;
use crate::model::score::{RoundState, Score};
use crate::model::settings::GameSettings;
use crate::model::wolf_choice::WolfChoice;

/// Everything the engine reads; the engine never writes any of it back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub settings: GameSettings,
    pub players: Vec<Player>,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub bets: Vec<Bet>,
    #[serde(default)]
    pub wolf_choices: Vec<WolfChoice>,
    #[serde(default)]
    pub round: RoundState,
}
