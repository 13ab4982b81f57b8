use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::player::PlayerId;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WolfCall {
    Partner,
    #[serde(alias = "lone")]
    Solo,
    Blind,
}

impl WolfCall {
    #[must_use]
    pub fn multiplier(self) -> i64 {
        match self {
            WolfCall::Partner => 1,
            WolfCall::Solo => 2,
            WolfCall::Blind => 3,
        }
    }
}

impl fmt::Display for WolfCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WolfCall::Partner => "partner",
            WolfCall::Solo => "lone wolf",
            WolfCall::Blind => "blind wolf",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WolfChoice {
    pub hole: u8,
    pub wolf_player: PlayerId,
    pub choice: WolfCall,
    #[serde(default)]
    pub partner: Option<PlayerId>,
}
