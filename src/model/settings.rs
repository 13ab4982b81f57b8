use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::GameError;
use crate::model::player::PlayerId;

/// Money is carried as whole cents everywhere past the settings boundary.
pub type Cents = i64;

/// Largest stake in dollars. Skins multiply a stake by the holes carried, so
/// this keeps every product well inside `Cents`.
pub const MAX_STAKE: f64 = 1_000_000.0;

/// Convert a dollar stake from settings or a bet record into cents.
///
/// # Errors
/// Returns a config error when the stake is negative, above [`MAX_STAKE`], or
/// not a finite number.
pub fn dollars_to_cents(dollars: f64) -> Result<Cents, GameError> {
    if !dollars.is_finite() || dollars < 0.0 {
        return Err(GameError::Config(format!(
            "stake must be a non-negative amount, got {dollars}"
        )));
    }
    if dollars > MAX_STAKE {
        return Err(GameError::Config(format!(
            "stake {dollars} is above the {MAX_STAKE} limit"
        )));
    }
    Ok((dollars * 100.0).round() as Cents)
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandicapMode {
    #[default]
    #[serde(alias = "scratch")]
    None,
    Full,
    Partial,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameSettings {
    pub hole_count: u8,
    pub pars: Vec<u8>,
    #[serde(default)]
    pub handicap_mode: HandicapMode,
    pub format: GameFormat,
}

impl GameSettings {
    #[must_use]
    pub fn holes(&self) -> RangeInclusive<u8> {
        1..=self.hole_count
    }

    #[must_use]
    pub fn par(&self, hole: u8) -> Option<u8> {
        if hole == 0 {
            return None;
        }
        self.pars.get(usize::from(hole) - 1).copied()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameFormat {
    Nassau(NassauSettings),
    Skins(SkinsSettings),
    MatchPlay(MatchPlaySettings),
    Wolf(WolfSettings),
}

impl fmt::Display for GameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameFormat::Nassau(_) => "nassau",
            GameFormat::Skins(_) => "skins",
            GameFormat::MatchPlay(_) => "match_play",
            GameFormat::Wolf(_) => "wolf",
        };
        write!(f, "{s}")
    }
}

fn default_press_threshold() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NassauSettings {
    pub front_bet: f64,
    pub back_bet: f64,
    pub overall_bet: f64,
    #[serde(default)]
    pub auto_press: bool,
    /// Presses allowed per pair per region; 0 means unlimited.
    #[serde(default)]
    pub press_limit: u32,
    /// Holes down before a press is suggested.
    #[serde(default = "default_press_threshold")]
    pub press_threshold: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinsSettings {
    pub skin_value: f64,
    #[serde(default = "default_true")]
    pub allow_carryovers: bool,
    #[serde(default)]
    pub split_final_ties: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Singles,
    Teams,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchPlaySettings {
    pub total_bet: f64,
    #[serde(default)]
    pub match_type: MatchType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfSettings {
    pub point_value: f64,
    #[serde(default)]
    pub blind_wolf: bool,
    /// Rotation captured at game creation; seat order when absent.
    #[serde(default)]
    pub wolf_order: Option<Vec<PlayerId>>,
}
