use serde::{Deserialize, Serialize};

use crate::model::player::PlayerId;
use crate::model::settings::Cents;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    /// Signed from the payer's side: positive adds to what `from_player` owes.
    pub amount: Cents,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from_player: PlayerId,
    pub to_player: PlayerId,
    pub amount: Cents,
    pub breakdown: Vec<LineItem>,
}
